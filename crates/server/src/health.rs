use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use enquire_db::DbPool;
use serde::Serialize;
use tracing::{error, info};

#[derive(Clone)]
pub struct HealthState {
    db_pool: DbPool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub database: HealthCheck,
    pub checked_at: String,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { db_pool })
}

pub async fn spawn(bind_address: &str, port: u16, db_pool: DbPool) -> std::io::Result<()> {
    let address = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "system.health.start",
        correlation_id = "bootstrap",
        bind_address = %address,
        "health endpoint started"
    );

    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router(db_pool)).await {
            error!(
                event_name = "system.health.error",
                correlation_id = "bootstrap",
                error = %error,
                "health endpoint server terminated unexpectedly"
            );
        }
    });

    Ok(())
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = database_check(&state.db_pool).await;
    let degraded = database.status != "ok";

    let response = HealthResponse {
        status: if degraded { "degraded" } else { "ok" },
        service: HealthCheck { status: "ok", detail: "enquire-server is running".to_owned() },
        database,
        checked_at: Utc::now().to_rfc3339(),
    };

    let code = if degraded { StatusCode::SERVICE_UNAVAILABLE } else { StatusCode::OK };
    (code, Json(response))
}

async fn database_check(db_pool: &DbPool) -> HealthCheck {
    match sqlx::query("SELECT 1").execute(db_pool).await {
        Ok(_) => HealthCheck { status: "ok", detail: "database reachable".to_owned() },
        Err(error) => HealthCheck { status: "error", detail: error.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use enquire_db::connect_with_settings;

    use super::router;

    #[tokio::test]
    async fn health_reports_ok_with_reachable_database() {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
        let app = router(pool);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
