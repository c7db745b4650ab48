//! Canonical status display metadata. The single lookup the presentation
//! layer uses for badges, replacing per-screen colour/icon tables.

use serde::{Deserialize, Serialize};

use crate::domain::enquiry::EnquiryStatus;
use crate::domain::quotation::QuotationStatus;
use crate::domain::task::Priority;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

pub fn enquiry_badge(status: EnquiryStatus) -> StatusBadge {
    match status {
        EnquiryStatus::Live => StatusBadge { label: "Live", color: "blue", icon: "bolt" },
        EnquiryStatus::Dead => StatusBadge { label: "Dead", color: "gray", icon: "slash" },
        EnquiryStatus::Rcd => StatusBadge { label: "Received", color: "teal", icon: "inbox" },
        EnquiryStatus::Won => StatusBadge { label: "Won", color: "green", icon: "trophy" },
        EnquiryStatus::Lost => StatusBadge { label: "Lost", color: "red", icon: "x-circle" },
        EnquiryStatus::Budgetary => {
            StatusBadge { label: "Budgetary", color: "amber", icon: "calculator" }
        }
    }
}

pub fn quotation_badge(status: QuotationStatus) -> StatusBadge {
    match status {
        QuotationStatus::Draft => StatusBadge { label: "Draft", color: "gray", icon: "pencil" },
        QuotationStatus::Live => StatusBadge { label: "Live", color: "blue", icon: "bolt" },
        QuotationStatus::Won => StatusBadge { label: "Won", color: "green", icon: "trophy" },
        QuotationStatus::Lost => StatusBadge { label: "Lost", color: "red", icon: "x-circle" },
        QuotationStatus::Budgetary => {
            StatusBadge { label: "Budgetary", color: "amber", icon: "calculator" }
        }
        QuotationStatus::Dead => StatusBadge { label: "Dead", color: "gray", icon: "slash" },
        QuotationStatus::Received => {
            StatusBadge { label: "PO received", color: "green", icon: "file-check" }
        }
    }
}

pub fn priority_badge(priority: Priority) -> StatusBadge {
    match priority {
        Priority::High => StatusBadge { label: "High", color: "red", icon: "alert-triangle" },
        Priority::Medium => StatusBadge { label: "Medium", color: "amber", icon: "clock" },
        Priority::Low => StatusBadge { label: "Low", color: "green", icon: "minus" },
    }
}

#[cfg(test)]
mod tests {
    use super::{enquiry_badge, quotation_badge};
    use crate::domain::enquiry::EnquiryStatus;
    use crate::domain::quotation::QuotationStatus;

    #[test]
    fn every_status_has_a_badge_with_nonempty_fields() {
        for status in EnquiryStatus::ALL {
            let badge = enquiry_badge(status);
            assert!(!badge.label.is_empty() && !badge.color.is_empty() && !badge.icon.is_empty());
        }
        for status in QuotationStatus::ALL {
            let badge = quotation_badge(status);
            assert!(!badge.label.is_empty() && !badge.color.is_empty() && !badge.icon.is_empty());
        }
    }
}
