use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::customer::CustomerId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnquiryId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnquiryStatus {
    Live,
    Dead,
    Rcd,
    Won,
    Lost,
    Budgetary,
}

impl EnquiryStatus {
    pub const ALL: [EnquiryStatus; 6] = [
        Self::Live,
        Self::Dead,
        Self::Rcd,
        Self::Won,
        Self::Lost,
        Self::Budgetary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "LIVE",
            Self::Dead => "DEAD",
            Self::Rcd => "RCD",
            Self::Won => "WON",
            Self::Lost => "LOST",
            Self::Budgetary => "BUDGETARY",
        }
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnquiryStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LIVE" => Ok(Self::Live),
            "DEAD" => Ok(Self::Dead),
            "RCD" => Ok(Self::Rcd),
            "WON" => Ok(Self::Won),
            "LOST" => Ok(Self::Lost),
            "BUDGETARY" => Ok(Self::Budgetary),
            other => Err(format!("unknown enquiry status `{other}`")),
        }
    }
}

/// Conditional fields stay populated once captured; a later transition away
/// from the status that required them never clears them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: EnquiryId,
    pub company_ref: CustomerId,
    pub status: EnquiryStatus,
    pub date_of_receipt: Option<NaiveDate>,
    pub purchase_order_number: Option<String>,
    pub po_value: Option<Decimal>,
    pub po_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enquiry {
    pub fn new(company_ref: CustomerId) -> Self {
        let now = Utc::now();
        Self {
            id: EnquiryId(Uuid::new_v4()),
            company_ref,
            status: EnquiryStatus::Live,
            date_of_receipt: None,
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
    use uuid::Uuid;

    use super::{Enquiry, EnquiryStatus};
    use crate::domain::customer::CustomerId;

    #[test]
    fn new_enquiry_starts_live_with_no_conditional_fields() {
        let enquiry = Enquiry::new(CustomerId(Uuid::new_v4()));

        assert_eq!(enquiry.status, EnquiryStatus::Live);
        assert_eq!(enquiry.date_of_receipt, None);
        assert_eq!(enquiry.purchase_order_number, None);
        assert_eq!(enquiry.po_value, None);
        assert_eq!(enquiry.po_date, None);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in EnquiryStatus::ALL {
            assert_eq!(status.as_str().parse::<EnquiryStatus>(), Ok(status));
        }
    }
}
