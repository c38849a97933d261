//! Product API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use shared::models::{Product, ProductCreate, ProductList, ProductSearch, ProductUpdate};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::api::{ApiJson, ApiQuery, IdQuery};
use crate::auth::CurrentVendor;
use crate::core::ServerState;
use crate::db::repository::product;
use crate::services::catalog;

/// POST /api/v1/product/add
pub async fn create(
    State(state): State<ServerState>,
    vendor: CurrentVendor,
    ApiJson(payload): ApiJson<ProductCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let created = catalog::create_product(&state.pool, &vendor, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Product created successfully",
            created,
        )),
    ))
}

/// GET /api/v1/product/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<ProductList>>> {
    let products = product::find_all(&state.pool).await?;
    let total = product::count(&state.pool).await?;
    Ok(Json(ApiResponse::success(ProductList { products, total })))
}

/// GET /api/v1/product/product?id=
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = query.require()?;
    let found = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(ApiResponse::success(found)))
}

/// GET /api/v1/product/searchproduct?title=&category=&sku=&tag=
pub async fn search(
    State(state): State<ServerState>,
    ApiQuery(filter): ApiQuery<ProductSearch>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let products = catalog::search_products(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::success(products)))
}

/// PATCH /api/v1/product/update
pub async fn update(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ProductUpdate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let updated = catalog::update_product(&state.pool, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Product updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/product/delete?id=
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    catalog::delete_product(&state.pool, query.require()?).await?;
    Ok(Json(ApiResponse::ok("Product deleted successfully")))
}

/// PATCH /api/v1/product/approve?id=
pub async fn approve(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let approved = catalog::approve_product(&state.pool, query.require()?).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Product approved successfully",
        approved,
    )))
}
