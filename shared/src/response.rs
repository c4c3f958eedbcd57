//! API response envelopes
//!
//! The storefront's JSON contract wraps payloads in a `{ success, data,
//! error }` envelope; list endpoints add a pagination block.

use serde::{Deserialize, Serialize};

/// Standard API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    /// Create a success response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination envelope for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_products: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Build the envelope for `page` of `total` records at `limit` per page
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64) as u32
        } else {
            1
        };
        Self {
            current_page: page,
            total_pages,
            total_products: total,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}
