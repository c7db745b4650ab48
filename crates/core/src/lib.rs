pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod lifecycle;
pub mod presentation;
pub mod worklist;

pub use audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink, TracingAuditSink};
pub use domain::communication::{Communication, CommunicationId, CommunicationKind};
pub use domain::customer::{Customer, CustomerId};
pub use domain::enquiry::{Enquiry, EnquiryId, EnquiryStatus};
pub use domain::quotation::{LostReason, Quotation, QuotationId, QuotationStatus};
pub use domain::task::{Priority, Task, TaskKind};
pub use errors::{ApplicationError, DomainError, EntityKind, InterfaceError};
pub use lifecycle::{EnquiryStatusMachine, QuotationStatusMachine, TransitionPayload, TransitionValidator};
pub use presentation::{enquiry_badge, priority_badge, quotation_badge, StatusBadge};
pub use worklist::{CommunicationScheduler, NewCommunication, PriorityClassifier, PriorityConfig, TaskDerivationEngine};
