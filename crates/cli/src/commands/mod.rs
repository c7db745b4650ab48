pub mod config;
pub mod doctor;
pub mod migrate;
pub mod seed;
pub mod tasks;

use serde::Serialize;

use enquire_core::config::{AppConfig, LoadOptions};
use enquire_db::{connect, DbPool};

/// One failed step inside a command body: error class, message, exit code.
pub(crate) type StepFailure = (&'static str, String, u8);

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Loads and validates configuration, mapping failure onto the command's
/// exit-code 2 result.
pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })
}

/// Stands up the single-threaded runtime that command bodies block on.
pub(crate) fn current_thread_runtime(
    command: &str,
) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        )
    })
}

/// Opens the configured database pool inside a command body.
pub(crate) async fn open_pool(config: &AppConfig) -> Result<DbPool, StepFailure> {
    connect(&config.database).await.map_err(|error| ("db_connectivity", error.to_string(), 4))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::CommandResult;

    #[test]
    fn failure_payload_carries_class_and_exit_code() {
        let result = CommandResult::failure("migrate", "db_connectivity", "no such file", 4);

        assert_eq!(result.exit_code, 4);
        assert!(result.output.contains("\"status\":\"error\""));
        assert!(result.output.contains("\"error_class\":\"db_connectivity\""));
    }

    #[test]
    fn success_payload_has_no_error_class() {
        let result = CommandResult::success("seed", "demo fixtures loaded");

        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("\"status\":\"ok\""));
        assert!(result.output.contains("\"error_class\":null"));
    }
}
