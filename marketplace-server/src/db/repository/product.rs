//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductSearch};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const PRODUCT_COLUMNS: &str = "id, title, description, short_description, sku, price, cut_price, discount, stock, category, subcategory, state, tags, image, thumbnails, youtube_video_link, vendor_id, vendor_name, is_approved, created_at, updated_at";

/// Validated values for a new product
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub sku: String,
    pub price: f64,
    pub cut_price: Option<f64>,
    pub discount: Option<String>,
    pub stock: i64,
    pub category: String,
    pub subcategory: Option<String>,
    pub state: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub thumbnails: Vec<String>,
    pub youtube_video_link: Option<String>,
    pub vendor_id: Option<i64>,
    pub vendor_name: Option<String>,
}

/// Validated partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub cut_price: Option<f64>,
    pub discount: Option<String>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub state: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
    pub thumbnails: Option<Vec<String>>,
    pub youtube_video_link: Option<String>,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Exact, case-sensitive SKU lookup
pub async fn find_by_sku(pool: &SqlitePool, sku: &str) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE sku = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(sku)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM product WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

pub async fn count_by_category(pool: &SqlitePool, category: &str) -> RepoResult<i64> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product WHERE category = ?")
        .bind(category)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Filter products; every provided filter must match
pub async fn search(pool: &SqlitePool, filter: &ProductSearch) -> RepoResult<Vec<Product>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE 1 = 1"));

    if let Some(title) = non_blank(&filter.title) {
        let pattern = format!("%{title}%");
        qb.push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR description LIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(category) = non_blank(&filter.category) {
        qb.push(" AND category = ").push_bind(category.to_string());
    }
    if let Some(sku) = non_blank(&filter.sku) {
        qb.push(" AND sku = ").push_bind(sku.to_string());
    }
    if let Some(tag) = non_blank(&filter.tag) {
        qb.push(" AND EXISTS (SELECT 1 FROM json_each(product.tags) WHERE json_each.value = ")
            .push_bind(tag.to_string())
            .push(")");
    }
    qb.push(" ORDER BY created_at DESC");

    let rows = qb.build_query_as::<Product>().fetch_all(pool).await?;
    Ok(rows)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub async fn create(pool: &SqlitePool, data: NewProduct) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO product (id, title, description, short_description, sku, price, cut_price, discount, stock, category, subcategory, state, tags, image, thumbnails, youtube_video_link, vendor_id, vendor_name, is_approved, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, 0, ?19, ?19)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.short_description)
    .bind(&data.sku)
    .bind(data.price)
    .bind(data.cut_price)
    .bind(&data.discount)
    .bind(data.stock)
    .bind(&data.category)
    .bind(&data.subcategory)
    .bind(&data.state)
    .bind(Json(&data.tags))
    .bind(&data.image)
    .bind(Json(&data.thumbnails))
    .bind(&data.youtube_video_link)
    .bind(data.vendor_id)
    .bind(&data.vendor_name)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductChanges) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET title = COALESCE(?1, title), description = COALESCE(?2, description), short_description = COALESCE(?3, short_description), sku = COALESCE(?4, sku), price = COALESCE(?5, price), cut_price = COALESCE(?6, cut_price), discount = COALESCE(?7, discount), stock = COALESCE(?8, stock), category = COALESCE(?9, category), subcategory = COALESCE(?10, subcategory), state = COALESCE(?11, state), tags = COALESCE(?12, tags), image = COALESCE(?13, image), thumbnails = COALESCE(?14, thumbnails), youtube_video_link = COALESCE(?15, youtube_video_link), updated_at = ?16 WHERE id = ?17",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.short_description)
    .bind(&data.sku)
    .bind(data.price)
    .bind(data.cut_price)
    .bind(&data.discount)
    .bind(data.stock)
    .bind(&data.category)
    .bind(&data.subcategory)
    .bind(&data.state)
    .bind(data.tags.as_ref().map(Json))
    .bind(&data.image)
    .bind(data.thumbnails.as_ref().map(Json))
    .bind(&data.youtube_video_link)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Mark a product approved; matching an already approved row still counts
pub async fn approve(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE product SET is_approved = 1, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Conditional stock decrement
///
/// Returns `false` when the product is missing or holds less than
/// `quantity`; stock never goes negative.
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    id: i64,
    quantity: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET stock = stock - ?1, updated_at = ?2 WHERE id = ?3 AND stock >= ?1",
    )
    .bind(quantity)
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn seed(pool: &SqlitePool, sku: &str, stock: i64, tags: &[&str]) -> Product {
        create(
            pool,
            NewProduct {
                title: format!("Product {sku}"),
                description: "A product".into(),
                sku: sku.into(),
                price: 10.0,
                stock,
                category: "Home".into(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_round_trips_json_columns() {
        let db = DbService::in_memory().await.unwrap();
        let product = seed(&db.pool, "SKU-1", 4, &["eco", "steel"]).await;
        assert_eq!(product.tags, vec!["eco".to_string(), "steel".to_string()]);
        assert!(product.thumbnails.is_empty());
        assert!(!product.is_approved);
        assert_eq!(product.vendor_id, None);
    }

    #[tokio::test]
    async fn sku_unique_constraint_is_duplicate() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool, "SKU-1", 4, &[]).await;
        let err = create(
            &db.pool,
            NewProduct {
                title: "Other".into(),
                description: "d".into(),
                sku: "SKU-1".into(),
                category: "Home".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn decrement_never_goes_negative() {
        let db = DbService::in_memory().await.unwrap();
        let product = seed(&db.pool, "SKU-1", 5, &[]).await;
        let mut conn = db.pool.acquire().await.unwrap();

        assert!(decrement_stock(&mut conn, product.id, 3).await.unwrap());
        assert!(!decrement_stock(&mut conn, product.id, 3).await.unwrap());
        assert!(decrement_stock(&mut conn, product.id, 2).await.unwrap());
        assert!(!decrement_stock(&mut conn, 999, 1).await.unwrap());
        drop(conn);

        let product = find_by_id(&db.pool, product.id).await.unwrap().unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn search_combines_filters() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool, "MUG-1", 1, &["eco"]).await;
        seed(&db.pool, "MUG-2", 1, &["steel"]).await;

        let by_tag = search(
            &db.pool,
            &ProductSearch {
                tag: Some("eco".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].sku, "MUG-1");

        let by_title_and_sku = search(
            &db.pool,
            &ProductSearch {
                title: Some("MUG".into()),
                sku: Some("MUG-2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_title_and_sku.len(), 1);

        let none = search(
            &db.pool,
            &ProductSearch {
                category: Some("Garden".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn approve_is_idempotent() {
        let db = DbService::in_memory().await.unwrap();
        let product = seed(&db.pool, "SKU-1", 1, &[]).await;
        assert!(approve(&db.pool, product.id).await.unwrap());
        assert!(approve(&db.pool, product.id).await.unwrap());
        assert!(!approve(&db.pool, 42).await.unwrap());
        let product = find_by_id(&db.pool, product.id).await.unwrap().unwrap();
        assert!(product.is_approved);
    }
}
