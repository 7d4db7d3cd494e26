use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use shared::store::Gateway;
use tracing::warn;
use utoipa::ToSchema;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up")),
    tag = "Health"
)]
pub async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Readiness {
    #[schema(example = "ready")]
    pub status: String,
}

/// Readiness probe; pings the document store.
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Document store reachable", body = Readiness),
        (status = 503, description = "Document store unreachable", body = Readiness),
    ),
    tag = "Health"
)]
pub async fn ready(State(db): State<Gateway>) -> (StatusCode, Json<Readiness>) {
    match db.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Readiness {
                status: "ready".to_string(),
            }),
        ),
        Err(e) => {
            warn!(error = ?e, "document store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "unavailable".to_string(),
                }),
            )
        }
    }
}
