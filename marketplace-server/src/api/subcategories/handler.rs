use axum::{Json, extract::State};
use http::StatusCode;
use shared::models::{Subcategory, SubcategoryCreate};
use shared::{ApiResponse, AppResult};

use crate::api::{ApiJson, ApiQuery, IdQuery};
use crate::core::ServerState;
use crate::db::repository::subcategory;
use crate::services::catalog;

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Subcategory>>>> {
    let subcategories = subcategory::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::success(subcategories)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<SubcategoryCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Subcategory>>)> {
    let created = catalog::create_subcategory(&state.pool, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Subcategory created successfully",
            created,
        )),
    ))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    catalog::delete_subcategory(&state.pool, query.require()?).await?;
    Ok(Json(ApiResponse::ok("Subcategory deleted successfully")))
}
