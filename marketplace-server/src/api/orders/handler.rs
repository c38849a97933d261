//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{Order, OrderStatusUpdate, PlaceOrderRequest, TotalPayments};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::api::ApiJson;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders;

/// POST /api/v1/order/add - one order per vendor in the cart
pub async fn place(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Vec<Order>>>)> {
    let placed = orders::place_order(&state.pool, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Orders placed successfully for each vendor",
            placed,
        )),
    ))
}

/// PATCH /api/v1/order/updateorder
pub async fn update_status(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let updated = orders::update_order_status(&state.pool, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Order status updated successfully",
        updated,
    )))
}

/// GET /api/v1/order/allorder
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let all = order::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::success(all)))
}

/// GET /api/v1/order/singleorder/{id}
///
/// Accepts the numeric id or the `ORD-` order number.
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let found = match id.trim().parse::<i64>() {
        Ok(numeric) => order::find_by_id(&state.pool, numeric).await?,
        Err(_) => order::find_by_number(&state.pool, id.trim()).await?,
    };
    let found = found.ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(ApiResponse::success(found)))
}

/// GET /api/v1/order/total-payments
pub async fn total_payments(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<TotalPayments>>> {
    let totals = order::total_payments(&state.pool).await?;
    Ok(Json(ApiResponse::success(totals)))
}
