//! Database models
//!
//! Record types stored in SurrealDB. Fields serialize camelCase in both the
//! database and the API, matching the storefront's JSON contract.

pub mod order;
pub mod product;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use order::{Order, OrderCreate, OrderId};
pub use product::{Product, ProductCreate, ProductId, ProductUpdate};
pub use user::{User, UserCreate, UserId};
