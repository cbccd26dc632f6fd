//! `GET /health`: liveness plus database reachability, mounted at the root.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub version: &'static str,
    pub database: &'static str,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthData>>) {
    match belva_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            ApiResponse::ok(
                "Service healthy",
                HealthData {
                    version: env!("CARGO_PKG_VERSION"),
                    database: "reachable",
                },
            ),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    success: false,
                    message: "Database unreachable".to_string(),
                    data: Some(HealthData {
                        version: env!("CARGO_PKG_VERSION"),
                        database: "unreachable",
                    }),
                }),
            )
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
