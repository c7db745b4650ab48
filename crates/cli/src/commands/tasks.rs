use std::collections::HashMap;

use chrono::Utc;

use crate::commands::{self, CommandResult, StepFailure};
use enquire_core::domain::task::Task;
use enquire_core::worklist::{PriorityClassifier, PriorityConfig, TaskDerivationEngine};
use enquire_db::repositories::{
    CommunicationRepository, CustomerRepository, EnquiryRepository, QuotationRepository,
    SqlCommunicationRepository, SqlCustomerRepository, SqlEnquiryRepository,
    SqlQuotationRepository,
};

pub fn run(json_output: bool) -> CommandResult {
    let config = match commands::load_config("tasks") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match commands::current_thread_runtime("tasks") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = commands::open_pool(&config).await?;

        let customers = SqlCustomerRepository::new(pool.clone());
        let enquiries = SqlEnquiryRepository::new(pool.clone());
        let quotations = SqlQuotationRepository::new(pool.clone());
        let communications = SqlCommunicationRepository::new(pool.clone());

        let load = async {
            let customers = customers.list().await?;
            let enquiries = enquiries.list().await?;
            let quotations = quotations.list().await?;
            let communications = communications.list().await?;
            Ok::<_, enquire_db::repositories::RepositoryError>((
                customers,
                enquiries,
                quotations,
                communications,
            ))
        };
        let (customers, enquiries, quotations, communications) =
            load.await.map_err(|error| ("worklist_query", error.to_string(), 5u8))?;
        pool.close().await;

        let names_by_customer: HashMap<_, _> =
            customers.into_iter().map(|customer| (customer.id.0, customer.name)).collect();
        let mut customer_names = HashMap::new();
        for enquiry in enquiries {
            if let Some(name) = names_by_customer.get(&enquiry.company_ref.0) {
                customer_names.insert(enquiry.id, name.clone());
            }
        }

        let engine = TaskDerivationEngine::new(PriorityClassifier::new(PriorityConfig {
            due_soon_window_days: config.worklist.due_soon_window_days,
        }));
        let today = Utc::now().date_naive();
        Ok::<Vec<Task>, StepFailure>(engine.derive(
            &quotations,
            &communications,
            &customer_names,
            today,
        ))
    });

    match result {
        Ok(tasks) if json_output => match serde_json::to_string_pretty(&tasks) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => CommandResult::failure("tasks", "serialization", error.to_string(), 3),
        },
        Ok(tasks) => CommandResult::success("tasks", render_tasks(&tasks)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("tasks", error_class, message, exit_code)
        }
    }
}

fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "worklist is empty".to_string();
    }

    let mut lines = vec![format!("{} open work items:", tasks.len())];
    for task in tasks {
        lines.push(format!(
            "  - [{:?}] {:?} due {} | {} | {}",
            task.priority, task.kind, task.due_date, task.customer_name, task.description
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use enquire_core::domain::task::{Priority, Task, TaskKind};

    use super::render_tasks;

    #[test]
    fn empty_worklist_renders_placeholder() {
        assert_eq!(render_tasks(&[]), "worklist is empty");
    }

    #[test]
    fn tasks_render_one_line_each() {
        let tasks = vec![Task {
            kind: TaskKind::Communication,
            source_id: Uuid::new_v4(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
            customer_name: "Apex Forgings".to_string(),
            description: "Share revised spares list".to_string(),
            source_status: "SCHEDULED".to_string(),
            priority: Priority::High,
        }];

        let rendered = render_tasks(&tasks);
        assert!(rendered.starts_with("1 open work items:"));
        assert!(rendered.contains("Apex Forgings"));
        assert!(rendered.contains("Share revised spares list"));
    }
}
