//! Checkout API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Checkout router
pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/checkout",
        get(handler::status).post(handler::checkout),
    )
}
