//! API routes
//!
//! # Structure
//!
//! - [`health`] - health check (public)
//! - [`auth`] - registration, login, password management
//! - [`products`] - catalog browsing (public reads, admin writes)
//! - [`orders`] - customer order history and creation
//! - [`checkout`] - checkout with payment-intent orchestration
//! - [`admin`] - back office (orders + users), admin-only

pub mod admin;
pub mod auth;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod products;

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Auth API
        .merge(auth::router())
        // Catalog API
        .merge(products::router())
        // Customer order API
        .merge(orders::router())
        // Checkout API
        .merge(checkout::router())
        // Admin API - admin role required
        .merge(admin::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // JWT authentication - runs before routes, injects CurrentUser;
        // public routes are skipped inside require_auth
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .with_state(state)
        // ========== Tower HTTP Middleware ==========
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - generate and propagate a unique id per request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Access log - outermost, sees the final status
        .layer(middleware::from_fn(log_request))
}
