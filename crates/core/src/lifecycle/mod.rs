pub mod machine;
pub mod registry;
pub mod validator;

pub use machine::{EnquiryStatusMachine, QuotationStatusMachine};
pub use registry::{enquiry_rule, quotation_rule, FieldRule, RuleCheck, StatusRule, TransitionPayload};
pub use validator::TransitionValidator;
