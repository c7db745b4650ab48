use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::enquiry::EnquiryId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunicationId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationKind {
    Telephonic,
    VirtualMeeting,
    Email,
    PlantVisit,
    OfficeVisit,
}

impl CommunicationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Telephonic => "TELEPHONIC",
            Self::VirtualMeeting => "VIRTUAL_MEETING",
            Self::Email => "EMAIL",
            Self::PlantVisit => "PLANT_VISIT",
            Self::OfficeVisit => "OFFICE_VISIT",
        }
    }
}

impl std::str::FromStr for CommunicationKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TELEPHONIC" => Ok(Self::Telephonic),
            "VIRTUAL_MEETING" => Ok(Self::VirtualMeeting),
            "EMAIL" => Ok(Self::Email),
            "PLANT_VISIT" => Ok(Self::PlantVisit),
            "OFFICE_VISIT" => Ok(Self::OfficeVisit),
            other => Err(format!("unknown communication kind `{other}`")),
        }
    }
}

/// A logged interaction. Immutable after creation except for
/// [`next_communication_date`], which only the explicit reschedule
/// operation may replace.
///
/// [`next_communication_date`]: Communication::next_communication_date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Communication {
    pub id: CommunicationId,
    pub enquiry_ref: EnquiryId,
    pub kind: CommunicationKind,
    pub description: String,
    pub next_communication_date: NaiveDate,
    pub proposed_next_action: Option<String>,
    pub created_at: DateTime<Utc>,
}
