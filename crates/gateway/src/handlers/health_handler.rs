//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: &'static str,
    pub store: StoreHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Report store connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let (status, store) = match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            StoreHealth {
                status: "healthy",
                error: None,
            },
        ),
        Err(e) => {
            tracing::warn!(error = ?e, "Store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                StoreHealth {
                    status: "unhealthy",
                    error: Some(e.user_message()),
                },
            )
        }
    };

    let response = HealthResponse {
        status: if status == StatusCode::OK { "healthy" } else { "degraded" },
        store,
    };
    (status, Json(response)).into_response()
}
