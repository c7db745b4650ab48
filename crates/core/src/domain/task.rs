use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tie-break order for equal due dates: quotation work sorts ahead of
/// communication follow-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    Quotation,
    Communication,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quotation => "QUOTATION",
            Self::Communication => "COMMUNICATION",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A derived work item. Never persisted; recomputed from current quotation
/// and communication rows on every worklist read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub kind: TaskKind,
    pub source_id: Uuid,
    pub due_date: NaiveDate,
    pub customer_name: String,
    pub description: String,
    pub source_status: String,
    pub priority: Priority,
}
