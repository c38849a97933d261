//! Vendor accounts
//!
//! Registration, credential checks and login-status bookkeeping.

use shared::models::{Vendor, VendorLogin, VendorLoginResponse, VendorRegister};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::auth::{JwtService, hash_password, verify_password};
use crate::db::repository::{RepoError, vendor};
use crate::security_log;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN,
    MAX_URL_LEN, require_text, validate_optional_text, validate_required_text,
};

fn owned(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate a registration payload and create the vendor
pub async fn register(pool: &SqlitePool, data: VendorRegister) -> AppResult<Vendor> {
    let seller_legal_name = require_text(&data.seller_legal_name)?;
    let pan_number = require_text(&data.pan_number)?;
    let account_holder_name = require_text(&data.account_holder_name)?;
    let account_type = require_text(&data.account_type)?;
    let account_number = require_text(&data.account_number)?;
    let confirm_account_number = require_text(&data.confirm_account_number)?;
    let ifsc_code = require_text(&data.ifsc_code)?;
    let first_name = require_text(&data.first_name)?;
    let last_name = require_text(&data.last_name)?;
    let mobile_number = require_text(&data.mobile_number)?;
    let email = require_text(&data.email)?.to_lowercase();
    let password = require_text(&data.password)?;
    let confirm_password = require_text(&data.confirm_password)?;
    let business_name = require_text(&data.business_name)?;
    let store_category = require_text(&data.store_category)?;
    let pin_code = require_text(&data.pin_code)?;
    let city = require_text(&data.city)?;
    let address = require_text(&data.address)?;
    let vendor_type = data
        .vendor_type
        .ok_or_else(|| AppError::required("vendorType is required"))?;

    for (value, field, max) in [
        (seller_legal_name, "sellerLegalName", MAX_NAME_LEN),
        (account_holder_name, "accountHolderName", MAX_NAME_LEN),
        (first_name, "firstName", MAX_NAME_LEN),
        (last_name, "lastName", MAX_NAME_LEN),
        (business_name, "businessName", MAX_NAME_LEN),
        (store_category, "storeCategory", MAX_NAME_LEN),
        (pan_number, "panNumber", MAX_SHORT_TEXT_LEN),
        (account_type, "accountType", MAX_SHORT_TEXT_LEN),
        (account_number, "accountNumber", MAX_SHORT_TEXT_LEN),
        (ifsc_code, "ifscCode", MAX_SHORT_TEXT_LEN),
        (mobile_number, "mobileNumber", MAX_SHORT_TEXT_LEN),
        (pin_code, "pinCode", MAX_SHORT_TEXT_LEN),
        (city, "city", MAX_NAME_LEN),
        (address, "address", MAX_ADDRESS_LEN),
        (email.as_str(), "email", MAX_EMAIL_LEN),
        (password, "password", MAX_PASSWORD_LEN),
    ] {
        validate_required_text(value, field, max)?;
    }
    validate_optional_text(&data.store_name, "storeName", MAX_NAME_LEN)?;
    validate_optional_text(&data.address_line1, "addressLine1", MAX_ADDRESS_LEN)?;
    validate_optional_text(&data.address_line2, "addressLine2", MAX_ADDRESS_LEN)?;
    for (value, field) in [
        (&data.pan_card_photo, "panCardPhoto"),
        (&data.gst_certificate, "gstCertificate"),
        (&data.store_logo, "storeLogo"),
        (&data.cover_image, "coverImage"),
    ] {
        validate_optional_text(value, field, MAX_URL_LEN)?;
    }

    if password != confirm_password {
        return Err(AppError::new(ErrorCode::PasswordMismatch));
    }
    if account_number != confirm_account_number {
        return Err(AppError::new(ErrorCode::AccountNumberMismatch));
    }

    if vendor::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::new(ErrorCode::VendorEmailExists));
    }
    if vendor::find_by_account_number(pool, account_number)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::VendorAccountExists));
    }

    let hashed_password = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = vendor::create(
        pool,
        vendor::NewVendor {
            seller_legal_name: seller_legal_name.to_string(),
            gst_number: owned(&data.gst_number),
            pan_number: pan_number.to_string(),
            pan_card_photo: owned(&data.pan_card_photo),
            gst_certificate: owned(&data.gst_certificate),
            account_holder_name: account_holder_name.to_string(),
            account_type: account_type.to_string(),
            account_number: account_number.to_string(),
            ifsc_code: ifsc_code.to_string(),
            vendor_type,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            mobile_number: mobile_number.to_string(),
            email,
            hashed_password,
            business_name: business_name.to_string(),
            store_name: owned(&data.store_name),
            store_category: store_category.to_string(),
            store_logo: owned(&data.store_logo),
            cover_image: owned(&data.cover_image),
            pin_code: pin_code.to_string(),
            city: city.to_string(),
            address: address.to_string(),
            address_line1: owned(&data.address_line1),
            address_line2: owned(&data.address_line2),
        },
    )
    .await
    .map_err(|e| match e {
        // lost a race with a concurrent registration
        RepoError::Duplicate(_) => AppError::new(ErrorCode::VendorEmailExists),
        other => other.into(),
    })?;

    tracing::info!(vendor_id = created.id, email = %created.email, "Vendor registered");
    Ok(created)
}

/// Check credentials, mark the vendor logged in and issue a bearer token
pub async fn login(
    pool: &SqlitePool,
    jwt: &JwtService,
    data: VendorLogin,
) -> AppResult<VendorLoginResponse> {
    let password = require_text(&data.password)?;

    let found = match (owned(&data.email), owned(&data.mobile_number)) {
        (Some(email), _) => vendor::find_by_email(pool, &email.to_lowercase()).await?,
        (None, Some(mobile)) => vendor::find_by_mobile(pool, &mobile).await?,
        (None, None) => return Err(AppError::required("email or mobileNumber is required")),
    };
    let Some(mut found) = found else {
        security_log!("WARN", "login_unknown_vendor");
        return Err(AppError::new(ErrorCode::VendorNotFound));
    };

    if !verify_password(password, &found.hashed_password) {
        security_log!("WARN", "login_failed", vendor_id = found.id);
        return Err(AppError::invalid_credentials());
    }

    let access_token = jwt
        .generate_token(found.id, &found.email, &found.display_name())
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    vendor::set_login_status(pool, found.id, true).await?;
    found.login_status = true;

    security_log!("INFO", "login_success", vendor_id = found.id);
    Ok(VendorLoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: jwt.expires_in_seconds(),
        vendor: found,
    })
}

pub async fn logout(pool: &SqlitePool, vendor_id: i64) -> AppResult<()> {
    vendor::set_login_status(pool, vendor_id, false)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::VendorNotFound),
            other => other.into(),
        })?;
    security_log!("INFO", "logout", vendor_id = vendor_id);
    Ok(())
}

pub async fn find_vendor(pool: &SqlitePool, id: i64) -> AppResult<Vendor> {
    vendor::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VendorNotFound))
}
