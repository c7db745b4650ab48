use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use enquire_core::domain::customer::{Customer, CustomerId};

use super::{decode_uuid, CustomerRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCustomerRepository {
    pool: DbPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> Result<Customer, RepositoryError> {
    let id: String = row.try_get("id")?;

    Ok(Customer {
        id: CustomerId(decode_uuid("id", &id)?),
        name: row.try_get("name")?,
        segment: row.try_get("segment")?,
    })
}

#[async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM customer WHERE id = ?1")
            .bind(id.0.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM customer ORDER BY name, id").fetch_all(&self.pool).await?;

        rows.iter().map(map_row).collect()
    }

    async fn save(&self, customer: Customer) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO customer (id, name, segment)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (id) DO UPDATE SET name = excluded.name, segment = excluded.segment",
        )
        .bind(customer.id.0.to_string())
        .bind(&customer.name)
        .bind(&customer.segment)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
