use async_trait::async_trait;
use thiserror::Error;

use enquire_core::domain::communication::{Communication, CommunicationId};
use enquire_core::domain::customer::{Customer, CustomerId};
use enquire_core::domain::enquiry::{Enquiry, EnquiryId};
use enquire_core::domain::quotation::{Quotation, QuotationId};

pub mod communication;
pub mod customer;
pub mod enquiry;
pub mod memory;
pub mod quotation;

pub use communication::SqlCommunicationRepository;
pub use customer::SqlCustomerRepository;
pub use enquiry::SqlEnquiryRepository;
pub use memory::{
    InMemoryCommunicationRepository, InMemoryCustomerRepository, InMemoryEnquiryRepository,
    InMemoryQuotationRepository,
};
pub use quotation::SqlQuotationRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError>;
    async fn save(&self, customer: Customer) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    async fn find_by_id(&self, id: &EnquiryId) -> Result<Option<Enquiry>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Enquiry>, RepositoryError>;
    async fn save(&self, enquiry: Enquiry) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    async fn find_by_id(&self, id: &QuotationId) -> Result<Option<Quotation>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Quotation>, RepositoryError>;
    async fn save(&self, quotation: Quotation) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CommunicationRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &CommunicationId,
    ) -> Result<Option<Communication>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Communication>, RepositoryError>;
    async fn save(&self, communication: Communication) -> Result<(), RepositoryError>;
}

pub(crate) fn decode_uuid(column: &str, value: &str) -> Result<uuid::Uuid, RepositoryError> {
    value
        .parse()
        .map_err(|_| RepositoryError::Decode(format!("column `{column}` holds invalid uuid `{value}`")))
}

pub(crate) fn decode_decimal(
    column: &str,
    value: &str,
) -> Result<rust_decimal::Decimal, RepositoryError> {
    value.parse().map_err(|_| {
        RepositoryError::Decode(format!("column `{column}` holds invalid decimal `{value}`"))
    })
}

pub(crate) fn decode_status<T>(column: &str, value: &str) -> Result<T, RepositoryError>
where
    T: std::str::FromStr,
{
    value.parse().map_err(|_| {
        RepositoryError::Decode(format!("column `{column}` holds unknown value `{value}`"))
    })
}
