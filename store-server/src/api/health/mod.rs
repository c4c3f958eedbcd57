//! Health API Module

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Health router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - liveness plus a database ping
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = match state.db.health().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            "unreachable"
        }
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
