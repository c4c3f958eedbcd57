//! Data models
//!
//! Plain value objects shared between store-server and frontend (via API).
//! API-facing types serialize with camelCase field names to match the
//! storefront's JSON contract.

pub mod order;
pub mod role;

// Re-exports
pub use order::*;
pub use role::*;
