//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::client::CreateOrderRequest;

use crate::auth::CurrentUser;
use crate::checkout::order_number;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::{OrderRepository, RepoError};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/orders - the caller's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_user(&user.id).await?;
    Ok(Json(orders))
}

/// POST /api/orders - create an order without a payment intent
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    if req.items.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "Order items are required",
        ));
    }
    if !(req.total.is_finite() && req.total > 0.0) {
        return Err(AppError::with_message(
            ErrorCode::OrderInvalidTotal,
            "Valid total amount is required",
        ));
    }
    if let Some(field) = req.shipping_address.missing_field() {
        return Err(AppError::with_message(
            ErrorCode::ShippingAddressIncomplete,
            format!("Shipping address {field} is required"),
        )
        .with_detail("field", field));
    }

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(OrderCreate {
            order_number: order_number::generate(),
            user_id: user.id.clone(),
            items: req.items,
            total: req.total,
            shipping_address: req.shipping_address,
            payment_details: None,
        })
        .await
        .map_err(|e| match e {
            // Collision on the random suffix; the client can simply resubmit
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            other => other.into(),
        })?;

    tracing::info!(
        order_number = %order.order_number,
        user_id = %user.id,
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id} - single order with ownership check
///
/// A non-admin caller may only fetch their own order.
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if order.user_id != user.id && !user.is_admin() {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }

    Ok(Json(order))
}
