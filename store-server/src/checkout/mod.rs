//! Checkout orchestrator
//!
//! Converts a validated cart submission into a persisted order and an
//! optional payment intent:
//!
//! 1. Validate items, total, and shipping address (client errors)
//! 2. Persist the order with status `pending`
//! 3. For card payments, request a payment intent for the total in minor
//!    currency units, tagged with the order for reconciliation
//! 4. On gateway success, store the intent id and hand the confirmation
//!    secret back to the caller
//! 5. On gateway failure, cancel the order and mark the payment failed;
//!    the record is retained as an audit trail
//!
//! There is no transaction spanning steps 2 and 3; a crash in between
//! leaves a `pending` order without an intent, recoverable only by manual
//! reconciliation.

pub mod order_number;

use std::sync::Arc;

use shared::client::{CheckoutRequest, CheckoutResponse, PaymentIntentInfo};
use shared::models::PaymentDetails;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::OrderCreate;
use crate::db::repository::{OrderRepository, RepoError};
use crate::services::{PaymentGateway, PaymentMetadata};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Create-order attempts before giving up on order-number collisions
const MAX_CREATE_ATTEMPTS: u32 = 2;

/// Checkout orchestration service
pub struct CheckoutService {
    orders: OrderRepository,
    payments: Arc<dyn PaymentGateway>,
}

impl CheckoutService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            orders: OrderRepository::new(state.db.clone()),
            payments: state.payments.clone(),
        }
    }

    /// Process a checkout submission for an authenticated user
    pub async fn process(
        &self,
        user: &CurrentUser,
        req: CheckoutRequest,
    ) -> AppResult<CheckoutResponse> {
        validate_submission(&req)?;

        // The card path is the default; anything else skips intent creation
        let wants_intent = req.payment_method == "stripe";

        let order = self.create_order(user, &req).await?;
        let order_id = order.id_string();

        if !wants_intent {
            return Ok(CheckoutResponse {
                success: true,
                order_id,
                order_number: order.order_number,
                payment_intent: None,
            });
        }

        let metadata = PaymentMetadata {
            order_id: order_id.clone(),
            order_number: order.order_number.clone(),
            user_id: user.id.clone(),
        };
        let amount_minor = (req.total * 100.0).round() as i64;

        match self
            .payments
            .create_payment_intent(amount_minor, "usd", &metadata)
            .await
        {
            Ok(intent) => {
                self.orders
                    .set_payment_intent(&order_id, &intent.id)
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?;

                tracing::info!(
                    order_number = %order.order_number,
                    intent_id = %intent.id,
                    "Checkout completed with payment intent"
                );

                Ok(CheckoutResponse {
                    success: true,
                    order_id,
                    order_number: order.order_number,
                    payment_intent: Some(PaymentIntentInfo {
                        id: intent.id,
                        client_secret: intent.client_secret,
                    }),
                })
            }
            Err(e) => {
                tracing::warn!(
                    order_number = %order.order_number,
                    error = %e,
                    "Payment intent creation failed, cancelling order"
                );

                // Compensating update; the cancelled order stays behind as
                // the audit trail of the failed attempt
                if let Err(update_err) = self.orders.mark_payment_failed(&order_id).await {
                    tracing::error!(
                        order_id = %order_id,
                        error = %update_err,
                        "Failed to cancel order after payment failure"
                    );
                }

                Err(AppError::payment_failed("Payment processing failed"))
            }
        }
    }

    async fn create_order(
        &self,
        user: &CurrentUser,
        req: &CheckoutRequest,
    ) -> AppResult<crate::db::models::Order> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let create = OrderCreate {
                order_number: order_number::generate(),
                user_id: user.id.clone(),
                items: req.items.clone(),
                total: req.total,
                shipping_address: req.shipping_address.clone(),
                payment_details: Some(PaymentDetails::pending(req.total)),
            };

            match self.orders.create(create).await {
                Ok(order) => return Ok(order),
                Err(RepoError::Duplicate(_)) if attempt < MAX_CREATE_ATTEMPTS => {
                    tracing::warn!("Order number collision, regenerating");
                }
                Err(e) => return Err(AppError::database(e.to_string())),
            }
        }
    }
}

/// Reject incomplete submissions before any record is written
fn validate_submission(req: &CheckoutRequest) -> AppResult<()> {
    if req.items.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "Cart items are required",
        ));
    }

    if !(req.total.is_finite() && req.total > 0.0) {
        return Err(AppError::with_message(
            ErrorCode::OrderInvalidTotal,
            "Invalid total amount",
        ));
    }

    if let Some(field) = req.shipping_address.missing_field() {
        return Err(AppError::with_message(
            ErrorCode::ShippingAddressIncomplete,
            format!("Shipping address {field} is required"),
        )
        .with_detail("field", field));
    }

    Ok(())
}
