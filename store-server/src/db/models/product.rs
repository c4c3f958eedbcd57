//! Product Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Product ID type
pub type ProductId = RecordId;

/// Product record
///
/// Owned by the admin subsystem; the customer-facing catalog only ever
/// reads active products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock: Option<u32>,
    pub images: Option<Vec<String>>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
