use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use enquire_core::domain::communication::{Communication, CommunicationId};
use enquire_core::domain::customer::{Customer, CustomerId};
use enquire_core::domain::enquiry::{Enquiry, EnquiryId};
use enquire_core::domain::quotation::{Quotation, QuotationId};

use super::{
    CommunicationRepository, CustomerRepository, EnquiryRepository, QuotationRepository,
    RepositoryError,
};

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<Uuid, Customer>>,
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id.0).cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.customers.read().await;
        let mut all: Vec<_> = customers.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.0.cmp(&b.id.0)));
        Ok(all)
    }

    async fn save(&self, customer: Customer) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().await;
        customers.insert(customer.id.0, customer);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEnquiryRepository {
    enquiries: RwLock<HashMap<Uuid, Enquiry>>,
}

#[async_trait::async_trait]
impl EnquiryRepository for InMemoryEnquiryRepository {
    async fn find_by_id(&self, id: &EnquiryId) -> Result<Option<Enquiry>, RepositoryError> {
        let enquiries = self.enquiries.read().await;
        Ok(enquiries.get(&id.0).cloned())
    }

    async fn list(&self) -> Result<Vec<Enquiry>, RepositoryError> {
        let enquiries = self.enquiries.read().await;
        let mut all: Vec<_> = enquiries.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(all)
    }

    async fn save(&self, enquiry: Enquiry) -> Result<(), RepositoryError> {
        let mut enquiries = self.enquiries.write().await;
        enquiries.insert(enquiry.id.0, enquiry);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuotationRepository {
    quotations: RwLock<HashMap<Uuid, Quotation>>,
}

#[async_trait::async_trait]
impl QuotationRepository for InMemoryQuotationRepository {
    async fn find_by_id(&self, id: &QuotationId) -> Result<Option<Quotation>, RepositoryError> {
        let quotations = self.quotations.read().await;
        Ok(quotations.get(&id.0).cloned())
    }

    async fn list(&self) -> Result<Vec<Quotation>, RepositoryError> {
        let quotations = self.quotations.read().await;
        let mut all: Vec<_> = quotations.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(all)
    }

    async fn save(&self, quotation: Quotation) -> Result<(), RepositoryError> {
        let mut quotations = self.quotations.write().await;
        quotations.insert(quotation.id.0, quotation);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCommunicationRepository {
    communications: RwLock<HashMap<Uuid, Communication>>,
}

#[async_trait::async_trait]
impl CommunicationRepository for InMemoryCommunicationRepository {
    async fn find_by_id(
        &self,
        id: &CommunicationId,
    ) -> Result<Option<Communication>, RepositoryError> {
        let communications = self.communications.read().await;
        Ok(communications.get(&id.0).cloned())
    }

    async fn list(&self) -> Result<Vec<Communication>, RepositoryError> {
        let communications = self.communications.read().await;
        let mut all: Vec<_> = communications.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(all)
    }

    async fn save(&self, communication: Communication) -> Result<(), RepositoryError> {
        let mut communications = self.communications.write().await;
        communications.insert(communication.id.0, communication);
        Ok(())
    }
}
