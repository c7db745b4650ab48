//! Deterministic demo dataset used by `enquire seed` and smoke checks.
//! Fixed ids make repeated seeding idempotent: re-running upserts the same
//! rows instead of multiplying them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use enquire_core::domain::communication::{Communication, CommunicationId, CommunicationKind};
use enquire_core::domain::customer::{Customer, CustomerId};
use enquire_core::domain::enquiry::{Enquiry, EnquiryId, EnquiryStatus};
use enquire_core::domain::quotation::{Quotation, QuotationId, QuotationStatus};

use crate::repositories::{
    CommunicationRepository, CustomerRepository, EnquiryRepository, QuotationRepository,
    RepositoryError, SqlCommunicationRepository, SqlCustomerRepository, SqlEnquiryRepository,
    SqlQuotationRepository,
};
use crate::DbPool;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: usize,
    pub enquiries: usize,
    pub quotations: usize,
    pub communications: usize,
}

fn fixed_id(discriminator: u128) -> Uuid {
    Uuid::from_u128(0x00E1_0000_0000_0000_0000_0000_0000_0000 | discriminator)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub async fn seed_demo_data(pool: &DbPool) -> Result<SeedSummary, RepositoryError> {
    let customers = SqlCustomerRepository::new(pool.clone());
    let enquiries = SqlEnquiryRepository::new(pool.clone());
    let quotations = SqlQuotationRepository::new(pool.clone());
    let communications = SqlCommunicationRepository::new(pool.clone());

    let apex = Customer {
        id: CustomerId(fixed_id(1)),
        name: "Apex Forgings".to_owned(),
        segment: "Heavy engineering".to_owned(),
    };
    let nordwind = Customer {
        id: CustomerId(fixed_id(2)),
        name: "Nordwind Pumps".to_owned(),
        segment: "Process equipment".to_owned(),
    };
    customers.save(apex.clone()).await?;
    customers.save(nordwind.clone()).await?;

    let mut live_enquiry = Enquiry::new(apex.id.clone());
    live_enquiry.id = EnquiryId(fixed_id(11));

    let mut received_enquiry = Enquiry::new(nordwind.id.clone());
    received_enquiry.id = EnquiryId(fixed_id(12));
    received_enquiry.status = EnquiryStatus::Rcd;
    received_enquiry.date_of_receipt = Some(date(2026, 8, 3));

    enquiries.save(live_enquiry.clone()).await?;
    enquiries.save(received_enquiry.clone()).await?;

    let mut open_quotation = Quotation::new(
        live_enquiry.id.clone(),
        Decimal::new(48_000, 0),
        date(2026, 9, 15),
    );
    open_quotation.id = QuotationId(fixed_id(21));
    open_quotation.status = QuotationStatus::Live;

    let mut expiring_quotation = Quotation::new(
        received_enquiry.id.clone(),
        Decimal::new(12_500, 0),
        date(2026, 8, 25),
    );
    expiring_quotation.id = QuotationId(fixed_id(22));

    quotations.save(open_quotation.clone()).await?;
    quotations.save(expiring_quotation.clone()).await?;

    let follow_up = Communication {
        id: CommunicationId(fixed_id(31)),
        enquiry_ref: live_enquiry.id.clone(),
        kind: CommunicationKind::PlantVisit,
        description: "Walked the line with the maintenance head".to_owned(),
        next_communication_date: date(2026, 9, 1),
        proposed_next_action: Some("Share revised spares list".to_owned()),
        created_at: live_enquiry.created_at,
    };
    communications.save(follow_up).await?;

    Ok(SeedSummary { customers: 2, enquiries: 2, quotations: 2, communications: 1 })
}

#[cfg(test)]
mod tests {
    use super::seed_demo_data;
    use crate::migrations::run_pending;
    use crate::repositories::{EnquiryRepository, SqlEnquiryRepository};
    use crate::connect_with_settings;

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
        run_pending(&pool).await.expect("migrations");

        let first = seed_demo_data(&pool).await.expect("first seed");
        let second = seed_demo_data(&pool).await.expect("second seed");
        assert_eq!(first, second);

        let enquiries = SqlEnquiryRepository::new(pool.clone());
        assert_eq!(enquiries.list().await.expect("list").len(), 2);
    }
}
