//! Checkout API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use shared::client::{CheckoutRequest, CheckoutResponse};

use crate::auth::CurrentUser;
use crate::checkout::CheckoutService;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/checkout - create an order and (for card payments) a payment
/// intent
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let service = CheckoutService::new(&state);
    let response = service.process(&user, req).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub order_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutStatus {
    pub order: Order,
}

/// GET /api/checkout?orderId= - poll an order after payment confirmation
pub async fn status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<CheckoutStatus>> {
    let order_id = query
        .order_id
        .ok_or_else(|| AppError::invalid("Order ID is required"))?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    // Callers may only poll their own orders
    if order.user_id != user.id && !user.is_admin() {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }

    Ok(Json(CheckoutStatus { order }))
}
