//! Vendor API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use shared::models::{
    DeliveryCredit, Vendor, VendorLogin, VendorLoginResponse, VendorRegister, WalletSummary,
    WalletTransaction, WithdrawalCreate, WithdrawalRequest, WithdrawalStatusUpdate,
};
use shared::{ApiResponse, AppResult};

use crate::api::{ApiJson, ApiQuery, IdQuery};
use crate::auth::CurrentVendor;
use crate::core::ServerState;
use crate::db::repository::vendor;
use crate::services::vendor_account;
use crate::wallet;

/// POST /api/v1/vendor/register
pub async fn register(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<VendorRegister>,
) -> AppResult<(StatusCode, Json<ApiResponse<Vendor>>)> {
    let created = vendor_account::register(&state.pool, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Vendor registered successfully",
            created,
        )),
    ))
}

/// POST /api/v1/vendor/login
pub async fn login(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<VendorLogin>,
) -> AppResult<Json<ApiResponse<VendorLoginResponse>>> {
    let response =
        vendor_account::login(&state.pool, state.get_jwt_service().as_ref(), payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Login successful",
        response,
    )))
}

/// POST /api/v1/vendor/logout
pub async fn logout(
    State(state): State<ServerState>,
    current: CurrentVendor,
) -> AppResult<Json<ApiResponse<()>>> {
    vendor_account::logout(&state.pool, current.id).await?;
    Ok(Json(ApiResponse::ok("Logout successful")))
}

/// GET /api/v1/vendor/
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Vendor>>>> {
    let vendors = vendor::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::success(vendors)))
}

/// GET /api/v1/vendor/vendor?id=
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let found = vendor_account::find_vendor(&state.pool, query.require()?).await?;
    Ok(Json(ApiResponse::success(found)))
}

/// GET /api/v1/vendor/wallet
pub async fn wallet(
    State(state): State<ServerState>,
    current: CurrentVendor,
) -> AppResult<Json<ApiResponse<WalletSummary>>> {
    let summary = wallet::wallet_summary(&state.pool, current.id).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// POST /api/v1/vendor/withdrawl
pub async fn request_withdrawal(
    State(state): State<ServerState>,
    current: CurrentVendor,
    ApiJson(payload): ApiJson<WithdrawalCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<WithdrawalRequest>>)> {
    let request = wallet::request_withdrawal(&state.pool, current.id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Withdrawal request submitted",
            request,
        )),
    ))
}

/// POST /api/v1/vendor/aprovewithdrwal
pub async fn update_withdrawal(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<WithdrawalStatusUpdate>,
) -> AppResult<Json<ApiResponse<WithdrawalRequest>>> {
    let updated = wallet::update_withdrawal_status(&state.pool, payload).await?;
    let message = format!("Withdrawal request {}", updated.status);
    Ok(Json(ApiResponse::success_with_message(message, updated)))
}

/// GET /api/v1/vendor/withdrawlall
pub async fn list_withdrawals(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<WithdrawalRequest>>>> {
    let requests = wallet::list_withdrawals(&state.pool).await?;
    Ok(Json(ApiResponse::success(requests)))
}

/// POST /api/v1/vendor/addpayments
pub async fn add_payment(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<DeliveryCredit>,
) -> AppResult<(StatusCode, Json<ApiResponse<WalletTransaction>>)> {
    let entry = wallet::add_delivered_product_transaction(&state.pool, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Payment recorded successfully",
            entry,
        )),
    ))
}
