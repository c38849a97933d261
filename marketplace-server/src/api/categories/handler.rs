//! Category API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use shared::models::{Category, CategoryCreate, CategoryUpdate, CategoryWithDetails};
use shared::{ApiResponse, AppResult};

use crate::api::{ApiJson, ApiQuery, IdQuery};
use crate::core::ServerState;
use crate::services::catalog;

/// GET /api/v1/category/all - categories with subcategories and product counts
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryWithDetails>>>> {
    let categories = catalog::list_categories(&state.pool).await?;
    Ok(Json(ApiResponse::success(categories)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let created = catalog::create_category(&state.pool, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Category created successfully",
            created,
        )),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let updated = catalog::update_category(&state.pool, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Category updated successfully",
        updated,
    )))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    catalog::delete_category(&state.pool, query.require()?).await?;
    Ok(Json(ApiResponse::ok("Category deleted successfully")))
}
