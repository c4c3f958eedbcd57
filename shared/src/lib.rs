//! Shared types for the storefront
//!
//! Common types used by the server and client binaries: the unified error
//! system, API request/response DTOs, the persisted cart store, and plain
//! value-object models (roles, order status, addresses).

pub mod cart;
pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::{CartItem, CartProduct, CartState, CartStore};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::{AppResponse, Pagination};
