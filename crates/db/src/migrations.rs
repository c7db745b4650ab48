use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Tables owned by the managed schema, in dependency order.
pub const MANAGED_TABLES: &[&str] = &["customer", "enquiry", "quotation", "communication"];

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::{run_pending, MANAGED_TABLES};
    use crate::connect_with_settings;

    const MANAGED_INDEXES: &[&str] = &[
        "idx_enquiry_status",
        "idx_enquiry_company_ref",
        "idx_quotation_status",
        "idx_quotation_enquiry_ref",
        "idx_quotation_validity_period",
        "idx_communication_enquiry_ref",
        "idx_communication_next_date",
    ];

    #[tokio::test]
    async fn migrations_create_every_managed_object() {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
        run_pending(&pool).await.expect("apply migrations");

        let rows = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type IN ('table', 'index') AND name NOT LIKE 'sqlite_%' AND name NOT LIKE '_sqlx%'",
        )
        .fetch_all(&pool)
        .await
        .expect("query sqlite_master");

        let names: Vec<String> =
            rows.iter().map(|row| row.get::<String, _>("name")).collect();

        for object in MANAGED_TABLES.iter().chain(MANAGED_INDEXES) {
            assert!(names.iter().any(|name| name == object), "missing schema object `{object}`");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
        run_pending(&pool).await.expect("first run");
        run_pending(&pool).await.expect("second run");
    }
}
