//! Payment gateway service
//!
//! Wraps the external payment collaborator (Stripe) behind a trait so the
//! checkout orchestrator can be exercised against a mock. No retry or
//! timeout policy wraps the call; a transient network failure and a
//! permanent decline are handled identically by the caller.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::core::Config;

/// Payment gateway errors
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment gateway is not configured")]
    NotConfigured,

    #[error("Payment gateway request failed: {0}")]
    Request(String),

    #[error("Payment gateway declined the request: {0}")]
    Declined(String),
}

/// A created payment intent
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Gateway-side intent id
    pub id: String,
    /// Secret the client exchanges to confirm the charge
    pub client_secret: String,
}

/// Reconciliation tags attached to every intent
#[derive(Debug, Clone)]
pub struct PaymentMetadata {
    pub order_id: String,
    pub order_number: String,
    pub user_id: String,
}

/// External payment collaborator
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for `amount_minor` minor currency units
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        metadata: &PaymentMetadata,
    ) -> Result<PaymentIntent, PaymentError>;
}

// =============================================================================
// Stripe
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorBody,
}

/// Stripe payment-intent client
pub struct StripeGateway {
    http: reqwest::Client,
    api_url: String,
    secret_key: Option<String>,
}

impl StripeGateway {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.stripe_api_url.clone(),
            secret_key: config.stripe_secret_key.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        metadata: &PaymentMetadata,
    ) -> Result<PaymentIntent, PaymentError> {
        let secret_key = self.secret_key.as_ref().ok_or(PaymentError::NotConfigured)?;

        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("metadata[order_id]", metadata.order_id.as_str()),
            ("metadata[order_number]", metadata.order_number.as_str()),
            ("metadata[user_id]", metadata.user_id.as_str()),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_url))
            .bearer_auth(secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Request(e.to_string()))?;

        if response.status().is_success() {
            let intent: StripeIntent = response
                .json()
                .await
                .map_err(|e| PaymentError::Request(format!("Malformed response: {e}")))?;
            Ok(PaymentIntent {
                id: intent.id,
                client_secret: intent.client_secret,
            })
        } else {
            let status = response.status();
            let message = response
                .json::<StripeErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            Err(PaymentError::Declined(message))
        }
    }
}
