//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryStatus, CategoryUpdate};
use sqlx::SqlitePool;
use std::collections::HashMap;

const CATEGORY_SELECT: &str = "SELECT id, title, link, image, status, is_header_category, is_collection_category, created_at, updated_at FROM category";

/// Validated values for a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub title: String,
    pub link: Option<String>,
    pub image: Option<String>,
    pub status: CategoryStatus,
    pub is_header_category: bool,
    pub is_collection_category: bool,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_title(pool: &SqlitePool, title: &str) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE title = ?");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(title)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: NewCategory) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO category (id, title, link, image, status, is_header_category, is_collection_category, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.link)
    .bind(&data.image)
    .bind(data.status)
    .bind(data.is_header_category)
    .bind(data.is_collection_category)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Update a category; a rename is carried over to the products that
/// reference the old title in the same transaction.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    old_title: &str,
    data: &CategoryUpdate,
) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let title = data.title.as_deref().map(str::trim);

    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        "UPDATE category SET title = COALESCE(?1, title), link = COALESCE(?2, link), image = COALESCE(?3, image), status = COALESCE(?4, status), is_header_category = COALESCE(?5, is_header_category), is_collection_category = COALESCE(?6, is_collection_category), updated_at = ?7 WHERE id = ?8",
    )
    .bind(title)
    .bind(&data.link)
    .bind(&data.image)
    .bind(data.status)
    .bind(data.is_header_category)
    .bind(data.is_collection_category)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }

    if let Some(new_title) = title.filter(|t| *t != old_title) {
        sqlx::query("UPDATE product SET category = ?1, updated_at = ?2 WHERE category = ?3")
            .bind(new_title)
            .bind(now)
            .bind(old_title)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category (subcategories cascade)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Number of products referencing each category title
pub async fn product_counts(pool: &SqlitePool) -> RepoResult<HashMap<String, i64>> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT category, COUNT(*) FROM product GROUP BY category")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}
