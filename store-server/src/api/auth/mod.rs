//! Auth API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Auth router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    // register/login and the reset flow are public; the middleware skip
    // list in auth::middleware must match these paths
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::me))
        .route("/change-password", post(handler::change_password))
        .route("/forgot-password", post(handler::forgot_password))
        .route("/reset-password", post(handler::reset_password))
}
