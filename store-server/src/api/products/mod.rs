//! Product API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Product router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    // Catalog reads are public (the auth middleware skips GET /api/products)
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // Catalog management is admin-only
    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
