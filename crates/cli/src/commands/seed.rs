use crate::commands::{self, CommandResult, StepFailure};
use enquire_db::{migrations, seed_demo_data, SeedSummary};

pub fn run() -> CommandResult {
    let config = match commands::load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match commands::current_thread_runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = commands::open_pool(&config).await?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let summary = seed_demo_data(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        pool.close().await;
        Ok::<SeedSummary, StepFailure>(summary)
    });

    match result {
        Ok(summary) => CommandResult::success("seed", render_summary(&summary)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn render_summary(summary: &SeedSummary) -> String {
    format!(
        "demo fixtures loaded: {} customers, {} enquiries, {} quotations, {} communications",
        summary.customers, summary.enquiries, summary.quotations, summary.communications
    )
}

#[cfg(test)]
mod tests {
    use enquire_db::SeedSummary;

    use super::render_summary;

    #[test]
    fn summary_message_is_deterministic() {
        let summary =
            SeedSummary { customers: 2, enquiries: 2, quotations: 2, communications: 1 };

        assert_eq!(
            render_summary(&summary),
            "demo fixtures loaded: 2 customers, 2 enquiries, 2 quotations, 1 communications"
        );
    }
}
