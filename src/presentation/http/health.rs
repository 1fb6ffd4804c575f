use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub message: &'static str,
}

impl HealthResp {
    fn from_ping(db_ok: bool) -> Self {
        if db_ok {
            Self {
                status: "healthy",
                message: "Database connection is up",
            }
        } else {
            Self {
                status: "degraded",
                message: "Database is unreachable",
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<PgPool>) -> Json<HealthResp> {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await;
    if let Err(e) = &ping {
        warn!(error = ?e, "health_db_ping_failed");
    }
    Json(HealthResp::from_ping(ping.is_ok()))
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
