use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use enquire_core::domain::enquiry::EnquiryId;
use enquire_core::domain::quotation::{Quotation, QuotationId};

use super::{decode_decimal, decode_status, decode_uuid, QuotationRepository, RepositoryError};
use crate::DbPool;

pub struct SqlQuotationRepository {
    pool: DbPool,
}

impl SqlQuotationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> Result<Quotation, RepositoryError> {
    let id: String = row.try_get("id")?;
    let enquiry_ref: String = row.try_get("enquiry_ref")?;
    let status: String = row.try_get("status")?;
    let total_value: String = row.try_get("total_value")?;
    let lost_reason: Option<String> = row.try_get("lost_reason")?;
    let po_value: Option<String> = row.try_get("po_value")?;

    Ok(Quotation {
        id: QuotationId(decode_uuid("id", &id)?),
        enquiry_ref: EnquiryId(decode_uuid("enquiry_ref", &enquiry_ref)?),
        status: decode_status("status", &status)?,
        total_value: decode_decimal("total_value", &total_value)?,
        validity_period: row.try_get::<NaiveDate, _>("validity_period")?,
        lost_reason: lost_reason
            .map(|reason| decode_status("lost_reason", &reason))
            .transpose()?,
        purchase_order_number: row.try_get("purchase_order_number")?,
        po_value: po_value.map(|value| decode_decimal("po_value", &value)).transpose()?,
        po_date: row.try_get::<Option<NaiveDate>, _>("po_date")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl QuotationRepository for SqlQuotationRepository {
    async fn find_by_id(&self, id: &QuotationId) -> Result<Option<Quotation>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM quotation WHERE id = ?1")
            .bind(id.0.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Quotation>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM quotation ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row).collect()
    }

    async fn save(&self, quotation: Quotation) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO quotation (id, enquiry_ref, status, total_value, validity_period, lost_reason, purchase_order_number, po_value, po_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT (id) DO UPDATE SET
                 enquiry_ref = excluded.enquiry_ref,
                 status = excluded.status,
                 total_value = excluded.total_value,
                 validity_period = excluded.validity_period,
                 lost_reason = excluded.lost_reason,
                 purchase_order_number = excluded.purchase_order_number,
                 po_value = excluded.po_value,
                 po_date = excluded.po_date,
                 updated_at = excluded.updated_at",
        )
        .bind(quotation.id.0.to_string())
        .bind(quotation.enquiry_ref.0.to_string())
        .bind(quotation.status.as_str())
        .bind(quotation.total_value.to_string())
        .bind(quotation.validity_period)
        .bind(quotation.lost_reason.map(|reason| reason.as_str()))
        .bind(&quotation.purchase_order_number)
        .bind(quotation.po_value.map(|value| value.to_string()))
        .bind(quotation.po_date)
        .bind(quotation.created_at)
        .bind(quotation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
