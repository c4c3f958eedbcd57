//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;

use shared::response::{AppResponse, Pagination};

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::query::{AppliedFilters, ProductListQuery};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

/// Listing response: one page plus the pagination envelope and the echo of
/// the applied filters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub success: bool,
    pub data: Vec<Product>,
    pub pagination: Pagination,
    pub filters: AppliedFilters,
}

/// GET /api/products - filtered, sorted, paginated catalog page
///
/// Out-of-range pages return an empty page, not an error.
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ProductListQuery>,
) -> AppResult<Json<ProductListResponse>> {
    let query = params.build();

    let repo = ProductRepository::new(state.db.clone());
    let (products, total) = repo.find_page(&query).await?;

    let pagination = Pagination::new(query.page(), query.limit(), total);

    Ok(Json(ProductListResponse {
        success: true,
        data: products,
        pagination,
        filters: query.filters,
    }))
}

/// GET /api/products/{id} - single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    Ok(Json(AppResponse::success(product)))
}

/// POST /api/products - create product (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Product>>)> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;

    tracing::info!(product_id = %product.id.as_ref().map(|t| t.to_string()).unwrap_or_default(), "Product created");

    Ok((StatusCode::CREATED, Json(AppResponse::success(product))))
}

/// PUT /api/products/{id} - update product (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;
    Ok(Json(AppResponse::success(product)))
}

/// DELETE /api/products/{id} - deactivate product (admin)
///
/// Products leave the catalog but are never hard-deleted; order items hold
/// snapshots either way.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.deactivate(&id).await?;

    tracing::info!(product_id = %id, "Product deactivated");

    Ok(Json(AppResponse::success(true)))
}
