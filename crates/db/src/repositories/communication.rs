use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use enquire_core::domain::communication::{Communication, CommunicationId};
use enquire_core::domain::enquiry::EnquiryId;

use super::{decode_status, decode_uuid, CommunicationRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCommunicationRepository {
    pool: DbPool,
}

impl SqlCommunicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> Result<Communication, RepositoryError> {
    let id: String = row.try_get("id")?;
    let enquiry_ref: String = row.try_get("enquiry_ref")?;
    let kind: String = row.try_get("kind")?;

    Ok(Communication {
        id: CommunicationId(decode_uuid("id", &id)?),
        enquiry_ref: EnquiryId(decode_uuid("enquiry_ref", &enquiry_ref)?),
        kind: decode_status("kind", &kind)?,
        description: row.try_get("description")?,
        next_communication_date: row.try_get::<NaiveDate, _>("next_communication_date")?,
        proposed_next_action: row.try_get("proposed_next_action")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl CommunicationRepository for SqlCommunicationRepository {
    async fn find_by_id(
        &self,
        id: &CommunicationId,
    ) -> Result<Option<Communication>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM communication WHERE id = ?1")
            .bind(id.0.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Communication>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM communication ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row).collect()
    }

    async fn save(&self, communication: Communication) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO communication (id, enquiry_ref, kind, description, next_communication_date, proposed_next_action, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (id) DO UPDATE SET
                 next_communication_date = excluded.next_communication_date",
        )
        .bind(communication.id.0.to_string())
        .bind(communication.enquiry_ref.0.to_string())
        .bind(communication.kind.as_str())
        .bind(&communication.description)
        .bind(communication.next_communication_date)
        .bind(&communication.proposed_next_action)
        .bind(communication.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
