//! Catalog Service
//!
//! Validation and uniqueness rules for products, categories and
//! subcategories. Handlers stay thin; everything that decides whether a
//! catalog write is allowed lives here.

use std::collections::HashMap;

use shared::models::{
    Category, CategoryCreate, CategoryUpdate, CategoryWithDetails, NumericInput, Product,
    ProductCreate, ProductSearch, ProductUpdate, Subcategory, SubcategoryCreate,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::auth::CurrentVendor;
use crate::db::repository::{RepoError, category, product, subcategory};
use crate::orders::money;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, require_text,
    validate_optional_text, validate_required_text,
};

/// Non-negative price with at most 2 decimal places
fn parse_price(value: &NumericInput) -> AppResult<f64> {
    value
        .as_f64()
        .filter(|p| *p >= 0.0 && money::to_cents(*p).is_some())
        .ok_or_else(|| AppError::new(ErrorCode::ProductInvalidPrice))
}

fn parse_optional_price(value: &Option<NumericInput>) -> AppResult<Option<f64>> {
    value.as_ref().map(parse_price).transpose()
}

fn parse_stock(value: &NumericInput) -> AppResult<i64> {
    value
        .as_i64()
        .filter(|s| *s >= 0)
        .ok_or_else(|| AppError::new(ErrorCode::ProductInvalidStock))
}

fn sku_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::SkuExists),
        other => other.into(),
    }
}

async fn ensure_category_exists(pool: &SqlitePool, title: &str) -> AppResult<()> {
    if category::find_by_title(pool, title).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category '{title}' not found"),
        ));
    }
    Ok(())
}

async fn ensure_subcategory_exists(pool: &SqlitePool, title: &str) -> AppResult<()> {
    if subcategory::find_by_title(pool, title).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::SubcategoryNotFound,
            format!("Subcategory '{title}' not found"),
        ));
    }
    Ok(())
}

// =============================================================================
// Products
// =============================================================================

/// Create a product owned by the authenticated vendor
pub async fn create_product(
    pool: &SqlitePool,
    vendor: &CurrentVendor,
    data: ProductCreate,
) -> AppResult<Product> {
    let title = require_text(&data.title)?;
    let description = require_text(&data.description)?;
    let sku = require_text(&data.sku)?;
    let category_title = require_text(&data.category)?;
    let subcategory_title = require_text(&data.subcategory)?;
    let state = require_text(&data.state)?;
    let price = data
        .price
        .as_ref()
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField))
        .and_then(parse_price)?;
    let stock = data
        .stock
        .as_ref()
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField))
        .and_then(parse_stock)?;
    let cut_price = parse_optional_price(&data.cut_price)?;

    validate_required_text(title, "title", MAX_NAME_LEN)?;
    validate_required_text(description, "description", MAX_NOTE_LEN)?;
    validate_required_text(sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.short_description, "shortDescription", MAX_NOTE_LEN)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
    validate_optional_text(&data.youtube_video_link, "youtubeVideoLink", MAX_URL_LEN)?;

    if product::find_by_sku(pool, sku).await?.is_some() {
        return Err(AppError::new(ErrorCode::SkuExists));
    }
    ensure_category_exists(pool, category_title).await?;
    ensure_subcategory_exists(pool, subcategory_title).await?;

    let created = product::create(
        pool,
        product::NewProduct {
            title: title.to_string(),
            description: description.to_string(),
            short_description: data.short_description,
            sku: sku.to_string(),
            price,
            cut_price,
            discount: data.discount,
            stock,
            category: category_title.to_string(),
            subcategory: Some(subcategory_title.to_string()),
            state: Some(state.to_string()),
            tags: data.tags,
            image: data.image,
            thumbnails: data.thumbnails,
            youtube_video_link: data.youtube_video_link,
            vendor_id: Some(vendor.id),
            vendor_name: Some(vendor.name.clone()),
        },
    )
    .await
    .map_err(sku_conflict)?;

    tracing::info!(product_id = created.id, sku = %created.sku, vendor_id = vendor.id, "Product created");
    Ok(created)
}

/// Partial product update; omitted fields keep their stored value
pub async fn update_product(pool: &SqlitePool, data: ProductUpdate) -> AppResult<Product> {
    let id = data
        .id
        .ok_or_else(|| AppError::required("Product id is required"))?;
    let existing = product::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    let sku = data.sku.as_deref().map(str::trim);
    if let Some(sku) = sku {
        validate_required_text(sku, "sku", MAX_SHORT_TEXT_LEN)?;
        if let Some(other) = product::find_by_sku(pool, sku).await?
            && other.id != existing.id
        {
            return Err(AppError::new(ErrorCode::SkuExists));
        }
    }

    let category_title = data.category.as_deref().map(str::trim);
    if let Some(title) = category_title
        && title != existing.category
    {
        ensure_category_exists(pool, title).await?;
    }

    let subcategory_title = data.subcategory.as_deref().map(str::trim);
    if let Some(title) = subcategory_title
        && existing.subcategory.as_deref() != Some(title)
    {
        ensure_subcategory_exists(pool, title).await?;
    }

    if let Some(title) = data.title.as_deref() {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let changes = product::ProductChanges {
        title: data.title.map(|t| t.trim().to_string()),
        description: data.description,
        short_description: data.short_description,
        sku: sku.map(str::to_string),
        price: parse_optional_price(&data.price)?,
        cut_price: parse_optional_price(&data.cut_price)?,
        discount: data.discount,
        stock: data.stock.as_ref().map(parse_stock).transpose()?,
        category: category_title.map(str::to_string),
        subcategory: subcategory_title.map(str::to_string),
        state: data.state,
        tags: data.tags,
        image: data.image,
        thumbnails: data.thumbnails,
        youtube_video_link: data.youtube_video_link,
    };

    let updated = product::update(pool, id, changes)
        .await
        .map_err(sku_conflict)?;
    tracing::info!(product_id = id, "Product updated");
    Ok(updated)
}

pub async fn delete_product(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !product::delete(pool, id).await? {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(())
}

/// Mark a product approved; approving twice is not an error
pub async fn approve_product(pool: &SqlitePool, id: i64) -> AppResult<Product> {
    if !product::approve(pool, id).await? {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    product::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))
}

pub async fn search_products(pool: &SqlitePool, filter: &ProductSearch) -> AppResult<Vec<Product>> {
    let products = product::search(pool, filter).await?;
    if products.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ProductNotFound,
            "No products found matching the criteria.",
        ));
    }
    Ok(products)
}

// =============================================================================
// Categories
// =============================================================================

/// All categories with their subcategories and product counts
pub async fn list_categories(pool: &SqlitePool) -> AppResult<Vec<CategoryWithDetails>> {
    let categories = category::find_all(pool).await?;
    let counts = category::product_counts(pool).await?;

    let mut by_parent: HashMap<i64, Vec<Subcategory>> = HashMap::new();
    for sub in subcategory::find_all(pool).await? {
        by_parent.entry(sub.category_id).or_default().push(sub);
    }

    Ok(categories
        .into_iter()
        .map(|category| CategoryWithDetails {
            subcategories: by_parent.remove(&category.id).unwrap_or_default(),
            product_count: counts.get(&category.title).copied().unwrap_or(0),
            category,
        })
        .collect())
}

pub async fn create_category(pool: &SqlitePool, data: CategoryCreate) -> AppResult<Category> {
    let title = require_text(&data.title)?;
    validate_required_text(title, "categoriesTitle", MAX_NAME_LEN)?;
    validate_optional_text(&data.link, "link", MAX_URL_LEN)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;

    if category::find_by_title(pool, title).await?.is_some() {
        return Err(AppError::new(ErrorCode::CategoryNameExists));
    }

    let created = category::create(
        pool,
        category::NewCategory {
            title: title.to_string(),
            link: data.link,
            image: data.image,
            status: data.status.unwrap_or_default(),
            is_header_category: data.is_header_category.unwrap_or(false),
            is_collection_category: data.is_collection_category.unwrap_or(false),
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::CategoryNameExists),
        other => other.into(),
    })?;

    tracing::info!(category_id = created.id, title = %created.title, "Category created");
    Ok(created)
}

/// Update a category; renaming carries the new title over to its products
pub async fn update_category(pool: &SqlitePool, data: CategoryUpdate) -> AppResult<Category> {
    let id = data
        .id
        .ok_or_else(|| AppError::required("Category id is required"))?;
    let existing = category::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    if let Some(title) = data.title.as_deref().map(str::trim) {
        validate_required_text(title, "categoriesTitle", MAX_NAME_LEN)?;
        if let Some(other) = category::find_by_title(pool, title).await?
            && other.id != id
        {
            return Err(AppError::new(ErrorCode::CategoryNameExists));
        }
    }

    let updated = category::update(pool, id, &existing.title, &data)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::CategoryNameExists),
            RepoError::NotFound(_) => AppError::new(ErrorCode::CategoryNotFound),
            other => other.into(),
        })?;
    tracing::info!(category_id = id, "Category updated");
    Ok(updated)
}

/// Delete a category unless a product still references it
pub async fn delete_category(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let existing = category::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let in_use = product::count_by_category(pool, &existing.title).await?;
    if in_use > 0 {
        return Err(AppError::with_message(
            ErrorCode::CategoryHasProducts,
            format!("Category '{}' is used by {in_use} product(s)", existing.title),
        ));
    }

    category::delete(pool, id).await?;
    tracing::info!(category_id = id, "Category deleted");
    Ok(())
}

// =============================================================================
// Subcategories
// =============================================================================

pub async fn create_subcategory(
    pool: &SqlitePool,
    data: SubcategoryCreate,
) -> AppResult<Subcategory> {
    let category_id = data
        .category_id
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField))?;
    let title = require_text(&data.title)?;
    validate_required_text(title, "title", MAX_NAME_LEN)?;

    if category::find_by_id(pool, category_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }
    if subcategory::find_by_title(pool, title).await?.is_some() {
        return Err(AppError::new(ErrorCode::SubcategoryNameExists));
    }

    let created = subcategory::create(pool, category_id, title, data.image.as_deref())
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::SubcategoryNameExists),
            other => other.into(),
        })?;
    tracing::info!(subcategory_id = created.id, category_id, "Subcategory created");
    Ok(created)
}

pub async fn delete_subcategory(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !subcategory::delete(pool, id).await? {
        return Err(AppError::new(ErrorCode::SubcategoryNotFound));
    }
    Ok(())
}
