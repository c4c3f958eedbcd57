//! Order value objects
//!
//! Embedded sub-documents of an order record. [`OrderItem`] is a snapshot of
//! product data at order time, decoupled from live product records so
//! historical orders stay stable when the catalog changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOrderStatus(pub String);

impl fmt::Display for InvalidOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order status: {}", self.0)
    }
}

impl std::error::Error for InvalidOrderStatus {}

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(InvalidOrderStatus(other.to_string())),
        }
    }
}

/// Payment progress reported by the payment collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

/// A line of an order, immutable once the order is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderItem {
    /// Line total (price × quantity)
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Shipping address captured at checkout
///
/// Every field is required by the checkout validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingAddress {
    /// Name of the first empty field, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        let fields: [(&'static str, &str); 7] = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
        ];
        fields
            .iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
    }
}

/// Payment collaborator state embedded in the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_payment_intent_id: Option<String>,
    pub status: PaymentStatus,
    pub amount: f64,
    pub currency: String,
}

impl PaymentDetails {
    /// Pending payment details for a freshly created order
    pub fn pending(amount: f64) -> Self {
        Self {
            stripe_payment_intent_id: None,
            status: PaymentStatus::Pending,
            amount,
            currency: "usd".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            product_id: "product:widget".into(),
            name: "Widget".into(),
            price: 9.99,
            quantity: 3,
        };
        assert!((item.line_total() - 29.97).abs() < 1e-9);
    }

    #[test]
    fn test_missing_field_reports_first_empty() {
        let mut addr = ShippingAddress {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            address: "1 Analytical Way".into(),
            city: "London".into(),
            state: "LDN".into(),
            zip_code: "E1 6AN".into(),
        };
        assert_eq!(addr.missing_field(), None);

        addr.zip_code = String::new();
        assert_eq!(addr.missing_field(), Some("zipCode"));

        addr.email = "  ".into();
        assert_eq!(addr.missing_field(), Some("email"));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let addr = ShippingAddress {
            first_name: "Ada".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&addr).unwrap();
        assert!(json.contains("\"firstName\":\"Ada\""));
        assert!(json.contains("\"zipCode\""));

        let details = PaymentDetails::pending(42.5);
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("\"status\":\"pending\""));
        assert!(json.contains("\"currency\":\"usd\""));
        // Absent intent id is omitted entirely
        assert!(!json.contains("stripePaymentIntentId"));
    }
}
