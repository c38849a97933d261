//! Subcategory Repository

use super::{RepoError, RepoResult};
use shared::models::Subcategory;
use sqlx::SqlitePool;

const SUBCATEGORY_SELECT: &str =
    "SELECT id, category_id, title, image, created_at, updated_at FROM subcategory";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Subcategory>> {
    let sql = format!("{SUBCATEGORY_SELECT} ORDER BY created_at");
    let rows = sqlx::query_as::<_, Subcategory>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Subcategory>> {
    let sql = format!("{SUBCATEGORY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Subcategory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_title(pool: &SqlitePool, title: &str) -> RepoResult<Option<Subcategory>> {
    let sql = format!("{SUBCATEGORY_SELECT} WHERE title = ?");
    let row = sqlx::query_as::<_, Subcategory>(&sql)
        .bind(title)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    category_id: i64,
    title: &str,
    image: Option<&str>,
) -> RepoResult<Subcategory> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO subcategory (id, category_id, title, image, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(category_id)
    .bind(title)
    .bind(image)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create subcategory".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM subcategory WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
