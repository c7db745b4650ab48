use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditCategory {
    Lifecycle,
    Worklist,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    Success,
    Rejected,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditContext {
    pub entity_id: Option<String>,
    pub correlation_id: String,
    pub actor: String,
}

impl AuditContext {
    pub fn new(
        entity_id: Option<String>,
        correlation_id: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self { entity_id, correlation_id: correlation_id.into(), actor: actor.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: String,
    pub entity_id: Option<String>,
    pub correlation_id: String,
    pub event_type: String,
    pub category: AuditCategory,
    pub actor: String,
    pub outcome: AuditOutcome,
    pub metadata: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        entity_id: Option<String>,
        correlation_id: impl Into<String>,
        event_type: impl Into<String>,
        category: AuditCategory,
        actor: impl Into<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            entity_id,
            correlation_id: correlation_id.into(),
            event_type: event_type.into(),
            category,
            actor: actor.into(),
            outcome,
            metadata: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub trait AuditSink: Send + Sync {
    fn emit(&self, event: AuditEvent);
}

#[derive(Clone, Default)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl InMemoryAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        // A panic while the lock is held must not lose the audit trail.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, event: AuditEvent) {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(event);
    }
}

/// Forwards audit events to the tracing pipeline for runtime visibility.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: AuditEvent) {
        tracing::info!(
            event_name = %event.event_type,
            correlation_id = %event.correlation_id,
            entity_id = event.entity_id.as_deref().unwrap_or("unknown"),
            actor = %event.actor,
            outcome = ?event.outcome,
            "audit event recorded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};

    #[test]
    fn in_memory_sink_collects_events_with_metadata() {
        let sink = InMemoryAuditSink::default();

        sink.emit(
            AuditEvent::new(
                Some("enq-1".to_owned()),
                "req-7",
                "lifecycle.transition_applied",
                AuditCategory::Lifecycle,
                "status-machine",
                AuditOutcome::Success,
            )
            .with_metadata("from", "LIVE")
            .with_metadata("to", "WON"),
        );

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].correlation_id, "req-7");
        assert_eq!(events[0].metadata.get("to").map(String::as_str), Some("WON"));
    }

    #[test]
    fn in_memory_sink_survives_a_poisoned_lock() {
        let sink = InMemoryAuditSink::default();
        sink.emit(AuditEvent::new(
            Some("enq-1".to_owned()),
            "req-8",
            "lifecycle.transition_applied",
            AuditCategory::Lifecycle,
            "status-machine",
            AuditOutcome::Success,
        ));

        let handle = sink.clone();
        let _ = std::thread::spawn(move || {
            let _guard = handle.events.lock().expect("lock");
            panic!("poison the sink lock");
        })
        .join();

        sink.emit(AuditEvent::new(
            None,
            "req-9",
            "worklist.communication_scheduled",
            AuditCategory::Worklist,
            "api",
            AuditOutcome::Success,
        ));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].correlation_id, "req-9");
    }
}
