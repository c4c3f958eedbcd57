//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{OrderItem, Role, ShippingAddress};

// Re-export ApiResponse from response module
pub use crate::response::AppResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Registration response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserInfo,
}

/// Message-only response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Password change request (authenticated)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub new_password: String,
}

/// Forgot-password request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

/// Reset-password request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub new_password: String,
}

// =============================================================================
// Checkout / Order API DTOs
// =============================================================================

fn default_payment_method() -> String {
    "stripe".to_string()
}

/// Checkout submission: the cart contents plus shipping details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub shipping_address: ShippingAddress,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

/// Payment intent handle returned to the caller for client-side confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentInfo {
    pub id: String,
    pub client_secret: String,
}

/// Checkout result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: String,
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent: Option<PaymentIntentInfo>,
}

/// Direct order creation (no payment intent)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub shipping_address: ShippingAddress,
}

// =============================================================================
// Admin API DTOs
// =============================================================================

/// Admin order status update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_id: String,
    pub status: String,
}

/// Admin user role update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    pub user_id: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "correct-horse".into(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".into(),
            ..ok
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_checkout_request_defaults_to_stripe() {
        let json = r#"{
            "items": [{"productId": "product:a", "name": "Widget", "price": 10.0, "quantity": 2}],
            "total": 20.0,
            "shippingAddress": {
                "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
                "address": "1 Analytical Way", "city": "London", "state": "LDN", "zipCode": "E1"
            }
        }"#;
        let req: CheckoutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.payment_method, "stripe");
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].quantity, 2);
    }

    #[test]
    fn test_checkout_response_omits_absent_intent() {
        let resp = CheckoutResponse {
            success: true,
            order_id: "order:abc".into(),
            order_number: "ORD-20260807-4F2K9Q".into(),
            payment_intent: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("paymentIntent"));
        assert!(json.contains("\"orderNumber\""));
    }
}
