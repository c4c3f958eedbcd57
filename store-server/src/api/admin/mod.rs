//! Admin API Module
//!
//! Back office: order management and user management. The whole group sits
//! behind [`require_admin`], so handlers never re-check the role.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Admin router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/orders",
            get(handler::list_orders).patch(handler::update_order_status),
        )
        .route(
            "/users",
            get(handler::list_users)
                .put(handler::update_user_role)
                .delete(handler::delete_user),
        )
        .layer(middleware::from_fn(require_admin))
}
