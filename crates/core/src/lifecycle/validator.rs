use crate::domain::enquiry::EnquiryStatus;
use crate::domain::quotation::QuotationStatus;
use crate::errors::DomainError;
use crate::lifecycle::registry::{enquiry_rule, quotation_rule, RuleCheck, StatusRule, TransitionPayload};

/// Pure payload validation against the status rule registry.
///
/// There is intentionally no transition graph: any status may move to any
/// other status provided the target's data requirements hold, which is how
/// operators correct mistakes (e.g. WON back to LIVE). The current status
/// is accepted for contract symmetry but never consulted.
pub struct TransitionValidator;

impl TransitionValidator {
    pub fn validate_enquiry(
        _current: EnquiryStatus,
        target: EnquiryStatus,
        payload: &TransitionPayload,
    ) -> Result<(), DomainError> {
        Self::check(enquiry_rule(target), target.as_str(), payload)
    }

    pub fn validate_quotation(
        _current: QuotationStatus,
        target: QuotationStatus,
        payload: &TransitionPayload,
    ) -> Result<(), DomainError> {
        Self::check(quotation_rule(target), target.as_str(), payload)
    }

    fn check(
        rule: &StatusRule,
        target: &str,
        payload: &TransitionPayload,
    ) -> Result<(), DomainError> {
        // Strict policy: a field the target status has no use for is
        // rejected rather than silently stripped.
        for present in payload.present_fields() {
            if !rule.applies(present) {
                return Err(DomainError::IllegalPayload { field: present, target: target.to_owned() });
            }
        }

        for field_rule in rule.required {
            match (field_rule.check)(payload) {
                RuleCheck::Satisfied => {}
                RuleCheck::Missing => {
                    return Err(DomainError::MissingRequiredField { field: field_rule.field });
                }
                RuleCheck::Invalid(reason) => {
                    return Err(DomainError::InvalidValue { field: field_rule.field, reason });
                }
            }
        }

        for field_rule in rule.optional {
            match (field_rule.check)(payload) {
                RuleCheck::Satisfied | RuleCheck::Missing => {}
                RuleCheck::Invalid(reason) => {
                    return Err(DomainError::InvalidValue { field: field_rule.field, reason });
                }
            }
        }

        Ok(())
    }
}
