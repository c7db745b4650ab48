//! Declarative status rules: one table from (entity kind, target status) to
//! the payload fields that transition must carry. Adding a status or a
//! requirement is an edit here only; the validator and both status machines
//! stay untouched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::enquiry::EnquiryStatus;
use crate::domain::quotation::{LostReason, QuotationStatus};

/// Wire names for transition payload fields, as surfaced in validation
/// errors.
pub mod field {
    pub const DATE_OF_RECEIPT: &str = "dateOfReceipt";
    pub const PURCHASE_ORDER_NUMBER: &str = "purchaseOrderNumber";
    pub const PO_VALUE: &str = "poValue";
    pub const PO_DATE: &str = "poDate";
    pub const LOST_REASON: &str = "lostReason";
    pub const NEXT_COMMUNICATION_DATE: &str = "nextCommunicationDate";
}

/// Auxiliary data supplied with a status transition. Every field is
/// optional at the type level; the registry decides which ones a given
/// target status requires, allows, or forbids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct TransitionPayload {
    pub date_of_receipt: Option<NaiveDate>,
    pub purchase_order_number: Option<String>,
    pub po_value: Option<Decimal>,
    pub po_date: Option<NaiveDate>,
    pub lost_reason: Option<LostReason>,
}

impl TransitionPayload {
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }

    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.date_of_receipt.is_some() {
            present.push(field::DATE_OF_RECEIPT);
        }
        if self.purchase_order_number.is_some() {
            present.push(field::PURCHASE_ORDER_NUMBER);
        }
        if self.po_value.is_some() {
            present.push(field::PO_VALUE);
        }
        if self.po_date.is_some() {
            present.push(field::PO_DATE);
        }
        if self.lost_reason.is_some() {
            present.push(field::LOST_REASON);
        }
        present
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleCheck {
    Satisfied,
    Missing,
    Invalid(String),
}

pub struct FieldRule {
    pub field: &'static str,
    pub check: fn(&TransitionPayload) -> RuleCheck,
}

pub struct StatusRule {
    /// Every rule must pass before the transition is accepted.
    pub required: &'static [FieldRule],
    /// Capturable with the transition; validated only when present.
    pub optional: &'static [FieldRule],
}

impl StatusRule {
    pub fn applies(&self, field: &str) -> bool {
        self.required.iter().chain(self.optional).any(|rule| rule.field == field)
    }
}

fn date_of_receipt(payload: &TransitionPayload) -> RuleCheck {
    match payload.date_of_receipt {
        Some(_) => RuleCheck::Satisfied,
        None => RuleCheck::Missing,
    }
}

fn purchase_order_number(payload: &TransitionPayload) -> RuleCheck {
    match &payload.purchase_order_number {
        Some(number) if !number.trim().is_empty() => RuleCheck::Satisfied,
        // An empty PO number counts as absent, not malformed.
        _ => RuleCheck::Missing,
    }
}

fn po_value(payload: &TransitionPayload) -> RuleCheck {
    match payload.po_value {
        Some(value) if value > Decimal::ZERO => RuleCheck::Satisfied,
        Some(_) => RuleCheck::Invalid("must be greater than zero".to_owned()),
        None => RuleCheck::Missing,
    }
}

fn po_date(payload: &TransitionPayload) -> RuleCheck {
    match payload.po_date {
        Some(_) => RuleCheck::Satisfied,
        None => RuleCheck::Missing,
    }
}

fn lost_reason(payload: &TransitionPayload) -> RuleCheck {
    match payload.lost_reason {
        Some(LostReason::Price)
        | Some(LostReason::DeliverySchedule)
        | Some(LostReason::LackOfConfidence)
        | Some(LostReason::Other) => RuleCheck::Satisfied,
        None => RuleCheck::Missing,
    }
}

static NO_REQUIREMENTS: StatusRule = StatusRule { required: &[], optional: &[] };

static ENQUIRY_RCD: StatusRule = StatusRule {
    required: &[FieldRule { field: field::DATE_OF_RECEIPT, check: date_of_receipt }],
    optional: &[],
};

static ENQUIRY_WON: StatusRule = StatusRule {
    required: &[
        FieldRule { field: field::PURCHASE_ORDER_NUMBER, check: purchase_order_number },
        FieldRule { field: field::PO_VALUE, check: po_value },
        FieldRule { field: field::PO_DATE, check: po_date },
    ],
    optional: &[],
};

static QUOTATION_LOST: StatusRule = StatusRule {
    required: &[FieldRule { field: field::LOST_REASON, check: lost_reason }],
    optional: &[],
};

static QUOTATION_WON: StatusRule = StatusRule {
    required: &[],
    optional: &[
        FieldRule { field: field::PURCHASE_ORDER_NUMBER, check: purchase_order_number },
        FieldRule { field: field::PO_VALUE, check: po_value },
        FieldRule { field: field::PO_DATE, check: po_date },
    ],
};

static QUOTATION_RECEIVED: StatusRule = StatusRule {
    required: &[FieldRule { field: field::PURCHASE_ORDER_NUMBER, check: purchase_order_number }],
    optional: &[
        FieldRule { field: field::PO_VALUE, check: po_value },
        FieldRule { field: field::PO_DATE, check: po_date },
    ],
};

/// Exhaustive over every enquiry status; a status with no extra data maps
/// to the empty rule, so adding a variant forces an edit here.
pub fn enquiry_rule(target: EnquiryStatus) -> &'static StatusRule {
    match target {
        EnquiryStatus::Rcd => &ENQUIRY_RCD,
        EnquiryStatus::Won => &ENQUIRY_WON,
        EnquiryStatus::Live
        | EnquiryStatus::Dead
        | EnquiryStatus::Lost
        | EnquiryStatus::Budgetary => &NO_REQUIREMENTS,
    }
}

pub fn quotation_rule(target: QuotationStatus) -> &'static StatusRule {
    match target {
        QuotationStatus::Lost => &QUOTATION_LOST,
        QuotationStatus::Won => &QUOTATION_WON,
        QuotationStatus::Received => &QUOTATION_RECEIVED,
        QuotationStatus::Draft
        | QuotationStatus::Live
        | QuotationStatus::Budgetary
        | QuotationStatus::Dead => &NO_REQUIREMENTS,
    }
}
