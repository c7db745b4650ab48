use chrono::Utc;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::enquiry::{Enquiry, EnquiryStatus};
use crate::domain::quotation::{Quotation, QuotationStatus};
use crate::errors::DomainError;
use crate::lifecycle::registry::TransitionPayload;
use crate::lifecycle::validator::TransitionValidator;

/// Applies a validated transition and returns one fully-formed entity for a
/// single persistence write. Conditional fields are merged additively: a
/// transition never strips data captured by an earlier status.
pub struct EnquiryStatusMachine;

impl EnquiryStatusMachine {
    pub fn apply(
        enquiry: &Enquiry,
        target: EnquiryStatus,
        payload: &TransitionPayload,
    ) -> Result<Enquiry, DomainError> {
        TransitionValidator::validate_enquiry(enquiry.status, target, payload)?;

        let mut updated = enquiry.clone();
        updated.status = target;
        if let Some(date) = payload.date_of_receipt {
            updated.date_of_receipt = Some(date);
        }
        if let Some(number) = &payload.purchase_order_number {
            updated.purchase_order_number = Some(number.clone());
        }
        if let Some(value) = payload.po_value {
            updated.po_value = Some(value);
        }
        if let Some(date) = payload.po_date {
            updated.po_date = Some(date);
        }
        updated.updated_at = Utc::now();
        Ok(updated)
    }

    pub fn apply_with_audit<S>(
        enquiry: &Enquiry,
        target: EnquiryStatus,
        payload: &TransitionPayload,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<Enquiry, DomainError>
    where
        S: AuditSink + ?Sized,
    {
        let result = Self::apply(enquiry, target, payload);
        emit_transition_audit(sink, audit, enquiry.status.as_str(), target.as_str(), &result);
        result
    }
}

pub struct QuotationStatusMachine;

impl QuotationStatusMachine {
    pub fn apply(
        quotation: &Quotation,
        target: QuotationStatus,
        payload: &TransitionPayload,
    ) -> Result<Quotation, DomainError> {
        TransitionValidator::validate_quotation(quotation.status, target, payload)?;

        let mut updated = quotation.clone();
        updated.status = target;
        if let Some(reason) = payload.lost_reason {
            updated.lost_reason = Some(reason);
        }
        if let Some(number) = &payload.purchase_order_number {
            updated.purchase_order_number = Some(number.clone());
        }
        if let Some(value) = payload.po_value {
            updated.po_value = Some(value);
        }
        if let Some(date) = payload.po_date {
            updated.po_date = Some(date);
        }
        updated.updated_at = Utc::now();
        Ok(updated)
    }

    pub fn apply_with_audit<S>(
        quotation: &Quotation,
        target: QuotationStatus,
        payload: &TransitionPayload,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<Quotation, DomainError>
    where
        S: AuditSink + ?Sized,
    {
        let result = Self::apply(quotation, target, payload);
        emit_transition_audit(sink, audit, quotation.status.as_str(), target.as_str(), &result);
        result
    }
}

fn emit_transition_audit<S, T>(
    sink: &S,
    audit: &AuditContext,
    from: &str,
    to: &str,
    result: &Result<T, DomainError>,
) where
    S: AuditSink + ?Sized,
{
    match result {
        Ok(_) => sink.emit(
            AuditEvent::new(
                audit.entity_id.clone(),
                audit.correlation_id.clone(),
                "lifecycle.transition_applied",
                AuditCategory::Lifecycle,
                audit.actor.clone(),
                AuditOutcome::Success,
            )
            .with_metadata("from", from)
            .with_metadata("to", to),
        ),
        Err(error) => sink.emit(
            AuditEvent::new(
                audit.entity_id.clone(),
                audit.correlation_id.clone(),
                "lifecycle.transition_rejected",
                AuditCategory::Lifecycle,
                audit.actor.clone(),
                AuditOutcome::Rejected,
            )
            .with_metadata("from", from)
            .with_metadata("to", to)
            .with_metadata("error", error.to_string()),
        ),
    }
}
