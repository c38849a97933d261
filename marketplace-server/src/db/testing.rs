//! Test fixtures over an in-memory database

use shared::models::{Category, CategoryStatus, Product, Vendor, VendorType};
use sqlx::SqlitePool;

use super::DbService;
use super::repository::{category, product, subcategory, vendor};

pub async fn pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

/// File-backed pool with several connections, for tests that race writers
pub async fn file_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marketplace.db");
    let db = DbService::new(&path.to_string_lossy()).await.unwrap();
    (dir, db.pool)
}

pub fn new_vendor(tag: &str) -> vendor::NewVendor {
    vendor::NewVendor {
        seller_legal_name: format!("{tag} Pvt Ltd"),
        gst_number: None,
        pan_number: format!("PAN{tag}"),
        pan_card_photo: None,
        gst_certificate: None,
        account_holder_name: format!("{tag} Holder"),
        account_type: "savings".into(),
        account_number: format!("ACC-{tag}"),
        ifsc_code: "IFSC0001".into(),
        vendor_type: VendorType::Vendor,
        first_name: tag.into(),
        last_name: "Seller".into(),
        mobile_number: format!("90000{tag}"),
        email: format!("{tag}@example.com"),
        hashed_password: crate::auth::hash_password("secret-pass").unwrap(),
        business_name: format!("{tag} Business"),
        store_name: Some(format!("{tag} Store")),
        store_category: "General".into(),
        store_logo: None,
        cover_image: None,
        pin_code: "560001".into(),
        city: "Bengaluru".into(),
        address: "1 MG Road".into(),
        address_line1: None,
        address_line2: None,
    }
}

pub async fn seed_vendor(pool: &SqlitePool, tag: &str) -> Vendor {
    vendor::create(pool, new_vendor(tag)).await.unwrap()
}

pub async fn seed_category(pool: &SqlitePool, title: &str) -> Category {
    category::create(
        pool,
        category::NewCategory {
            title: title.into(),
            link: None,
            image: None,
            status: CategoryStatus::Active,
            is_header_category: false,
            is_collection_category: false,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_subcategory(pool: &SqlitePool, category_id: i64, title: &str) {
    subcategory::create(pool, category_id, title, None)
        .await
        .unwrap();
}

/// Product owned by `vendor_id` with the given price and stock
pub async fn seed_product(
    pool: &SqlitePool,
    vendor_id: Option<i64>,
    sku: &str,
    price: f64,
    stock: i64,
) -> Product {
    product::create(
        pool,
        product::NewProduct {
            title: format!("Product {sku}"),
            description: "Test product".into(),
            sku: sku.into(),
            price,
            stock,
            category: "General".into(),
            vendor_id,
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn set_balance(pool: &SqlitePool, vendor_id: i64, balance: f64) {
    sqlx::query("UPDATE vendor SET wallet_balance_cents = ? WHERE id = ?")
        .bind((balance * 100.0).round() as i64)
        .bind(vendor_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn balance_cents(pool: &SqlitePool, vendor_id: i64) -> i64 {
    sqlx::query_scalar("SELECT wallet_balance_cents FROM vendor WHERE id = ?")
        .bind(vendor_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Credits minus debits over a vendor's ledger, in cents
pub async fn ledger_sum_cents(pool: &SqlitePool, vendor_id: i64) -> i64 {
    sqlx::query_scalar(
        "SELECT COALESCE(SUM(CASE direction WHEN 'credit' THEN amount_cents ELSE -amount_cents END), 0) FROM wallet_transaction WHERE vendor_id = ?",
    )
    .bind(vendor_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
