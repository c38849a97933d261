//! Vendor Repository

use super::{RepoError, RepoResult};
use shared::models::{Vendor, VendorType};
use sqlx::{SqliteConnection, SqlitePool};

const VENDOR_SELECT: &str = "SELECT id, seller_legal_name, gst_number, pan_number, pan_card_photo, gst_certificate, account_holder_name, account_type, account_number, ifsc_code, vendor_type, first_name, last_name, mobile_number, email, hashed_password, business_name, store_name, store_category, store_logo, cover_image, pin_code, city, address, address_line1, address_line2, wallet_balance_cents / 100.0 AS wallet_balance, login_status, last_login_at, created_at, updated_at FROM vendor";

/// Validated values for a new vendor (password already hashed)
#[derive(Debug, Clone)]
pub struct NewVendor {
    pub seller_legal_name: String,
    pub gst_number: Option<String>,
    pub pan_number: String,
    pub pan_card_photo: Option<String>,
    pub gst_certificate: Option<String>,
    pub account_holder_name: String,
    pub account_type: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub vendor_type: VendorType,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    pub hashed_password: String,
    pub business_name: String,
    pub store_name: Option<String>,
    pub store_category: String,
    pub store_logo: Option<String>,
    pub cover_image: Option<String>,
    pub pin_code: String,
    pub city: String,
    pub address: String,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Vendor>> {
    let sql = format!("{VENDOR_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Vendor>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Vendor>> {
    let sql = format!("{VENDOR_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Vendor>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Case-insensitive email lookup
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Vendor>> {
    let sql = format!("{VENDOR_SELECT} WHERE email = ? COLLATE NOCASE");
    let row = sqlx::query_as::<_, Vendor>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_mobile(pool: &SqlitePool, mobile: &str) -> RepoResult<Option<Vendor>> {
    let sql = format!("{VENDOR_SELECT} WHERE mobile_number = ? ORDER BY created_at LIMIT 1");
    let row = sqlx::query_as::<_, Vendor>(&sql)
        .bind(mobile)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_account_number(
    pool: &SqlitePool,
    account_number: &str,
) -> RepoResult<Option<Vendor>> {
    let sql = format!("{VENDOR_SELECT} WHERE account_number = ?");
    let row = sqlx::query_as::<_, Vendor>(&sql)
        .bind(account_number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM vendor WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

pub async fn create(pool: &SqlitePool, data: NewVendor) -> RepoResult<Vendor> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO vendor (id, seller_legal_name, gst_number, pan_number, pan_card_photo, gst_certificate, account_holder_name, account_type, account_number, ifsc_code, vendor_type, first_name, last_name, mobile_number, email, hashed_password, business_name, store_name, store_category, store_logo, cover_image, pin_code, city, address, address_line1, address_line2, wallet_balance_cents, login_status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, 0, 0, ?27, ?27)",
    )
    .bind(id)
    .bind(&data.seller_legal_name)
    .bind(&data.gst_number)
    .bind(&data.pan_number)
    .bind(&data.pan_card_photo)
    .bind(&data.gst_certificate)
    .bind(&data.account_holder_name)
    .bind(&data.account_type)
    .bind(&data.account_number)
    .bind(&data.ifsc_code)
    .bind(data.vendor_type)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.mobile_number)
    .bind(&data.email)
    .bind(&data.hashed_password)
    .bind(&data.business_name)
    .bind(&data.store_name)
    .bind(&data.store_category)
    .bind(&data.store_logo)
    .bind(&data.cover_image)
    .bind(&data.pin_code)
    .bind(&data.city)
    .bind(&data.address)
    .bind(&data.address_line1)
    .bind(&data.address_line2)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create vendor".into()))
}

/// Record a login (`logged_in = true`) or logout
pub async fn set_login_status(pool: &SqlitePool, id: i64, logged_in: bool) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE vendor SET login_status = ?1, last_login_at = CASE WHEN ?1 THEN ?2 ELSE last_login_at END, updated_at = ?2 WHERE id = ?3",
    )
    .bind(logged_in)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Vendor {id} not found")));
    }
    Ok(())
}
