use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::communication::Communication;
use crate::domain::enquiry::EnquiryId;
use crate::domain::quotation::Quotation;
use crate::domain::task::{Task, TaskKind};
use crate::worklist::priority::PriorityClassifier;

/// Synthesizes the worklist from current quotation and communication rows.
///
/// Derivation is a pure function of the snapshot: no task is ever stored,
/// and repeated calls over the same rows return the same list in the same
/// order (due date ascending, ties by kind then source id). Completed work
/// disappears simply by falling outside the derivation predicates.
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskDerivationEngine {
    classifier: PriorityClassifier,
}

const UNKNOWN_CUSTOMER: &str = "(unknown customer)";
const COMMUNICATION_TASK_STATUS: &str = "SCHEDULED";

impl TaskDerivationEngine {
    pub fn new(classifier: PriorityClassifier) -> Self {
        Self { classifier }
    }

    pub fn derive(
        &self,
        quotations: &[Quotation],
        communications: &[Communication],
        customer_names: &HashMap<EnquiryId, String>,
        today: NaiveDate,
    ) -> Vec<Task> {
        let mut tasks = Vec::with_capacity(quotations.len() + communications.len());

        for quotation in quotations.iter().filter(|q| q.status.is_active()) {
            tasks.push(Task {
                kind: TaskKind::Quotation,
                source_id: quotation.id.0,
                due_date: quotation.validity_period,
                customer_name: customer_name(customer_names, &quotation.enquiry_ref),
                description: format!(
                    "Quotation worth {} expires {}",
                    quotation.total_value, quotation.validity_period
                ),
                source_status: quotation.status.as_str().to_owned(),
                priority: self.classifier.classify(quotation.validity_period, today),
            });
        }

        // One task per communication row; duplicates for the same enquiry
        // are surfaced, not collapsed to the latest.
        for communication in communications {
            let description = match communication.proposed_next_action.as_deref() {
                Some(action) if !action.trim().is_empty() => action.to_owned(),
                _ => communication.description.clone(),
            };
            tasks.push(Task {
                kind: TaskKind::Communication,
                source_id: communication.id.0,
                due_date: communication.next_communication_date,
                customer_name: customer_name(customer_names, &communication.enquiry_ref),
                description,
                source_status: COMMUNICATION_TASK_STATUS.to_owned(),
                priority: self
                    .classifier
                    .classify(communication.next_communication_date, today),
            });
        }

        tasks.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.kind.cmp(&b.kind))
                .then(a.source_id.cmp(&b.source_id))
        });
        tasks
    }
}

fn customer_name(names: &HashMap<EnquiryId, String>, enquiry: &EnquiryId) -> String {
    names.get(enquiry).cloned().unwrap_or_else(|| UNKNOWN_CUSTOMER.to_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::TaskDerivationEngine;
    use crate::domain::communication::{Communication, CommunicationId, CommunicationKind};
    use crate::domain::enquiry::EnquiryId;
    use crate::domain::quotation::{Quotation, QuotationStatus};
    use crate::domain::task::{Priority, TaskKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2026, 8, 20)
    }

    fn quotation(status: QuotationStatus, expires: NaiveDate) -> Quotation {
        let mut quotation =
            Quotation::new(EnquiryId(Uuid::new_v4()), Decimal::new(48_000, 0), expires);
        quotation.status = status;
        quotation
    }

    fn communication(enquiry: EnquiryId, next: NaiveDate) -> Communication {
        Communication {
            id: CommunicationId(Uuid::new_v4()),
            enquiry_ref: enquiry,
            kind: CommunicationKind::Email,
            description: "Shared technical datasheet".to_owned(),
            next_communication_date: next,
            proposed_next_action: Some("Call to confirm receipt".to_owned()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn only_active_quotations_yield_tasks() {
        let engine = TaskDerivationEngine::default();
        let quotations: Vec<_> = QuotationStatus::ALL
            .into_iter()
            .map(|status| quotation(status, date(2026, 8, 25)))
            .collect();

        let tasks = engine.derive(&quotations, &[], &HashMap::new(), today());

        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.kind == TaskKind::Quotation));
        assert!(tasks.iter().all(|t| t.source_status == "DRAFT" || t.source_status == "LIVE"));
    }

    #[test]
    fn every_communication_row_yields_its_own_task() {
        let engine = TaskDerivationEngine::default();
        let enquiry = EnquiryId(Uuid::new_v4());
        let communications = vec![
            communication(enquiry.clone(), date(2026, 8, 22)),
            communication(enquiry.clone(), date(2026, 8, 29)),
        ];

        let tasks = engine.derive(&[], &communications, &HashMap::new(), today());

        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.source_status == "SCHEDULED"));
    }

    #[test]
    fn derivation_is_deterministic_and_sorted_by_due_date() {
        let engine = TaskDerivationEngine::default();
        let enquiry = EnquiryId(Uuid::new_v4());
        let quotations = vec![
            quotation(QuotationStatus::Live, date(2026, 9, 10)),
            quotation(QuotationStatus::Draft, date(2026, 8, 21)),
        ];
        let communications = vec![
            communication(enquiry.clone(), date(2026, 8, 18)),
            communication(enquiry.clone(), date(2026, 9, 10)),
        ];
        let names = HashMap::new();

        let first = engine.derive(&quotations, &communications, &names, today());
        let second = engine.derive(&quotations, &communications, &names, today());

        assert_eq!(first, second);
        let due_dates: Vec<_> = first.iter().map(|t| t.due_date).collect();
        let mut sorted = due_dates.clone();
        sorted.sort();
        assert_eq!(due_dates, sorted);
        // Equal due dates: quotation work sorts ahead of communications.
        assert_eq!(first[2].kind, TaskKind::Quotation);
        assert_eq!(first[3].kind, TaskKind::Communication);
    }

    #[test]
    fn overdue_communication_is_high_priority() {
        let engine = TaskDerivationEngine::default();
        let tasks = engine.derive(
            &[],
            &[communication(EnquiryId(Uuid::new_v4()), today() - chrono::Duration::days(1))],
            &HashMap::new(),
            today(),
        );

        assert_eq!(tasks[0].priority, Priority::High);
    }

    #[test]
    fn customer_names_resolve_through_the_enquiry() {
        let engine = TaskDerivationEngine::default();
        let enquiry = EnquiryId(Uuid::new_v4());
        let mut names = HashMap::new();
        names.insert(enquiry.clone(), "Apex Forgings".to_owned());

        let tasks =
            engine.derive(&[], &[communication(enquiry, date(2026, 8, 25))], &names, today());

        assert_eq!(tasks[0].customer_name, "Apex Forgings");
        assert_eq!(tasks[0].description, "Call to confirm receipt");
    }

    #[test]
    fn unknown_enquiry_falls_back_to_placeholder_name() {
        let engine = TaskDerivationEngine::default();
        let tasks = engine.derive(
            &[],
            &[communication(EnquiryId(Uuid::new_v4()), date(2026, 8, 25))],
            &HashMap::new(),
            today(),
        );

        assert_eq!(tasks[0].customer_name, "(unknown customer)");
    }
}
