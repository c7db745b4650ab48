use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::communication::{Communication, CommunicationId, CommunicationKind};
use crate::domain::enquiry::EnquiryId;
use crate::errors::DomainError;
use crate::lifecycle::registry::field;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunication {
    pub enquiry_ref: EnquiryId,
    pub kind: CommunicationKind,
    pub description: String,
    /// The sole input that spawns a COMMUNICATION task; creation is
    /// rejected without it.
    pub next_communication_date: Option<NaiveDate>,
    pub proposed_next_action: Option<String>,
}

pub struct CommunicationScheduler;

impl CommunicationScheduler {
    pub fn schedule(request: NewCommunication) -> Result<Communication, DomainError> {
        let next_communication_date = request
            .next_communication_date
            .ok_or(DomainError::MissingRequiredField { field: field::NEXT_COMMUNICATION_DATE })?;

        Ok(Communication {
            id: CommunicationId(Uuid::new_v4()),
            enquiry_ref: request.enquiry_ref,
            kind: request.kind,
            description: request.description,
            next_communication_date,
            proposed_next_action: request.proposed_next_action,
            created_at: Utc::now(),
        })
    }

    /// The one mutation a communication supports after creation.
    pub fn reschedule(communication: &Communication, next: NaiveDate) -> Communication {
        let mut updated = communication.clone();
        updated.next_communication_date = next;
        updated
    }
}
