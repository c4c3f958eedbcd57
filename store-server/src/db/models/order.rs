//! Order Model

use serde::{Deserialize, Serialize};
use shared::models::{OrderItem, OrderStatus, PaymentDetails, ShippingAddress};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order ID type
pub type OrderId = RecordId;

/// Order record
///
/// Items are immutable snapshots of product data at order time. Orders are
/// never hard-deleted; a failed payment leaves a cancelled record behind
/// as the audit trail of the attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    /// Human-readable identifier for customer-facing display
    pub order_number: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default = "default_status")]
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_status() -> OrderStatus {
    OrderStatus::Pending
}

impl Order {
    /// Record id as an "order:..." string (empty for unsaved records)
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub order_number: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub shipping_address: ShippingAddress,
    pub payment_details: Option<PaymentDetails>,
}
