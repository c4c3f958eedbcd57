//! Storefront Server - self-hosted B2B storefront backend
//!
//! # Architecture Overview
//!
//! This crate is the main entry of the storefront backend, providing:
//!
//! - **Catalog** (`db`): embedded SurrealDB storage with a filter/sort/
//!   paginate query builder for product listings
//! - **Authentication** (`auth`): JWT + argon2 credential sessions with
//!   role-based access (user / supplier / admin)
//! - **Checkout** (`checkout`): order creation plus payment-intent
//!   orchestration with compensating rollback
//! - **Payments** (`services/payment`): Stripe payment-intent client behind
//!   a gateway trait
//! - **HTTP API** (`api`): RESTful JSON endpoints
//!
//! # Module Structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # Config, state, server
//! ├── auth/          # JWT auth, role middleware
//! ├── db/            # Database layer, repositories, query builder
//! ├── checkout/      # Checkout orchestrator
//! ├── services/      # Payment gateway, mailer
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Logging and helpers
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured auth/permission events
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}
