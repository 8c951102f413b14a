use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

async fn health_check(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<HealthResponse>) {
    match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "database unavailable".to_string(),
                }),
            )
        }
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/version", get(version))
}
