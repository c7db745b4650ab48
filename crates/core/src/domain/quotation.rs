use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::enquiry::EnquiryId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotationId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    Draft,
    Live,
    Won,
    Lost,
    Budgetary,
    Dead,
    Received,
}

impl QuotationStatus {
    pub const ALL: [QuotationStatus; 7] = [
        Self::Draft,
        Self::Live,
        Self::Won,
        Self::Lost,
        Self::Budgetary,
        Self::Dead,
        Self::Received,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Live => "LIVE",
            Self::Won => "WON",
            Self::Lost => "LOST",
            Self::Budgetary => "BUDGETARY",
            Self::Dead => "DEAD",
            Self::Received => "RECEIVED",
        }
    }

    /// A quotation still being worked; everything else is terminal for the
    /// worklist and yields no derived task.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Draft | Self::Live)
    }
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuotationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "LIVE" => Ok(Self::Live),
            "WON" => Ok(Self::Won),
            "LOST" => Ok(Self::Lost),
            "BUDGETARY" => Ok(Self::Budgetary),
            "DEAD" => Ok(Self::Dead),
            "RECEIVED" => Ok(Self::Received),
            other => Err(format!("unknown quotation status `{other}`")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LostReason {
    Price,
    DeliverySchedule,
    LackOfConfidence,
    Other,
}

impl LostReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "PRICE",
            Self::DeliverySchedule => "DELIVERY_SCHEDULE",
            Self::LackOfConfidence => "LACK_OF_CONFIDENCE",
            Self::Other => "OTHER",
        }
    }
}

impl std::str::FromStr for LostReason {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PRICE" => Ok(Self::Price),
            "DELIVERY_SCHEDULE" => Ok(Self::DeliverySchedule),
            "LACK_OF_CONFIDENCE" => Ok(Self::LackOfConfidence),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("unknown lost reason `{other}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: QuotationId,
    pub enquiry_ref: EnquiryId,
    pub status: QuotationStatus,
    pub total_value: Decimal,
    /// Expiry date; doubles as the actionable due date on the worklist.
    pub validity_period: NaiveDate,
    pub lost_reason: Option<LostReason>,
    pub purchase_order_number: Option<String>,
    pub po_value: Option<Decimal>,
    pub po_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quotation {
    pub fn new(enquiry_ref: EnquiryId, total_value: Decimal, validity_period: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: QuotationId(Uuid::new_v4()),
            enquiry_ref,
            status: QuotationStatus::Draft,
            total_value,
            validity_period,
            lost_reason: None,
            purchase_order_number: None,
            po_value: None,
            po_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QuotationStatus;

    #[test]
    fn only_draft_and_live_are_active() {
        for status in QuotationStatus::ALL {
            let expected = matches!(status, QuotationStatus::Draft | QuotationStatus::Live);
            assert_eq!(status.is_active(), expected, "status {status}");
        }
    }
}
