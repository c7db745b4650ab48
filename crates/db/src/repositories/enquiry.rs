use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use enquire_core::domain::customer::CustomerId;
use enquire_core::domain::enquiry::{Enquiry, EnquiryId};

use super::{decode_decimal, decode_status, decode_uuid, EnquiryRepository, RepositoryError};
use crate::DbPool;

pub struct SqlEnquiryRepository {
    pool: DbPool,
}

impl SqlEnquiryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> Result<Enquiry, RepositoryError> {
    let id: String = row.try_get("id")?;
    let company_ref: String = row.try_get("company_ref")?;
    let status: String = row.try_get("status")?;
    let po_value: Option<String> = row.try_get("po_value")?;

    Ok(Enquiry {
        id: EnquiryId(decode_uuid("id", &id)?),
        company_ref: CustomerId(decode_uuid("company_ref", &company_ref)?),
        status: decode_status("status", &status)?,
        date_of_receipt: row.try_get::<Option<NaiveDate>, _>("date_of_receipt")?,
        purchase_order_number: row.try_get("purchase_order_number")?,
        po_value: po_value.map(|value| decode_decimal("po_value", &value)).transpose()?,
        po_date: row.try_get::<Option<NaiveDate>, _>("po_date")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl EnquiryRepository for SqlEnquiryRepository {
    async fn find_by_id(&self, id: &EnquiryId) -> Result<Option<Enquiry>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM enquiry WHERE id = ?1")
            .bind(id.0.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Enquiry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM enquiry ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row).collect()
    }

    async fn save(&self, enquiry: Enquiry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO enquiry (id, company_ref, status, date_of_receipt, purchase_order_number, po_value, po_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT (id) DO UPDATE SET
                 company_ref = excluded.company_ref,
                 status = excluded.status,
                 date_of_receipt = excluded.date_of_receipt,
                 purchase_order_number = excluded.purchase_order_number,
                 po_value = excluded.po_value,
                 po_date = excluded.po_date,
                 updated_at = excluded.updated_at",
        )
        .bind(enquiry.id.0.to_string())
        .bind(enquiry.company_ref.0.to_string())
        .bind(enquiry.status.as_str())
        .bind(enquiry.date_of_receipt)
        .bind(&enquiry.purchase_order_number)
        .bind(enquiry.po_value.map(|value| value.to_string()))
        .bind(enquiry.po_date)
        .bind(enquiry.created_at)
        .bind(enquiry.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
