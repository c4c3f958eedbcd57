//! Admin API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::client::{MessageResponse, UpdateOrderStatusRequest, UpdateUserRoleRequest};
use shared::models::{OrderStatus, Role};
use shared::response::AppResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, User};
use crate::db::repository::{OrderRepository, RepoError, UserRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

// =============================================================================
// Order Management
// =============================================================================

/// GET /api/admin/orders - all orders, newest first
pub async fn list_orders(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(AppResponse::success(orders)))
}

/// PATCH /api/admin/orders - update one order's status
pub async fn update_order_status(
    State(state): State<ServerState>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    if req.order_id.trim().is_empty() {
        return Err(AppError::invalid("Order ID is required"));
    }

    let status: OrderStatus = req
        .status
        .parse()
        .map_err(|_| AppError::new(ErrorCode::OrderInvalidStatus))?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .update_status(&req.order_id, status)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::OrderNotFound),
            other => other.into(),
        })?;

    tracing::info!(order_id = %req.order_id, status = %status, "Order status updated");

    Ok(Json(AppResponse::success(order)))
}

// =============================================================================
// User Management
// =============================================================================

/// GET /api/admin/users - all users (password hashes never serialize)
pub async fn list_users(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<User>>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(Json(AppResponse::success(users)))
}

/// PUT /api/admin/users - change a user's role
pub async fn update_user_role(
    State(state): State<ServerState>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    if req.user_id.trim().is_empty() {
        return Err(AppError::invalid("User ID and role are required"));
    }

    let role: Role = req
        .role
        .parse()
        .map_err(|_| AppError::new(ErrorCode::InvalidRole))?;

    let repo = UserRepository::new(state.db.clone());
    repo.update_role(&req.user_id, role)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::UserNotFound),
            other => other.into(),
        })?;

    tracing::info!(user_id = %req.user_id, role = %role, "User role updated");

    Ok(Json(MessageResponse::new("User role updated successfully")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserQuery {
    pub user_id: Option<String>,
}

/// DELETE /api/admin/users?userId= - delete a user account
pub async fn delete_user(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Query(query): Query<DeleteUserQuery>,
) -> AppResult<Json<MessageResponse>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::invalid("User ID is required"))?;

    if user_id == admin.id {
        return Err(AppError::new(ErrorCode::CannotDeleteSelf));
    }

    let repo = UserRepository::new(state.db.clone());
    repo.delete(&user_id).await.map_err(|e| match e {
        RepoError::NotFound(_) => AppError::new(ErrorCode::UserNotFound),
        other => other.into(),
    })?;

    tracing::info!(user_id = %user_id, deleted_by = %admin.id, "User deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
