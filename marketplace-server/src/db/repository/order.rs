//! Order Repository
//!
//! Orders are stored as a header row plus line items and an append-only
//! status history. Readers always get the fully populated [`Order`].

use super::RepoResult;
use shared::models::{
    Order, OrderItem, OrderStatus, PaymentInfo, ShippingInfo, StatusChange, TotalPayments,
};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_SELECT: &str = "SELECT id, order_number, customer_id, vendor_id, total_amount, status, shipping_info, payment_info, created_at, updated_at FROM customer_order";

/// A fully priced, single-vendor order ready to be stored
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: String,
    pub vendor_id: i64,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub shipping_info: ShippingInfo,
    pub payment_info: PaymentInfo,
}

/// Insert a `Pending` order with its lines and first history entry
pub async fn insert_pending(pool: &SqlitePool, data: &NewOrder) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let order_number = format!("ORD-{id}");

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO customer_order (id, order_number, customer_id, vendor_id, total_amount, status, shipping_info, payment_info, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(&order_number)
    .bind(&data.customer_id)
    .bind(data.vendor_id)
    .bind(data.total_amount)
    .bind(OrderStatus::Pending)
    .bind(Json(&data.shipping_info))
    .bind(Json(&data.payment_info))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (position, item) in data.items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_item (order_id, position, product_id, quantity, unit_price) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(id)
        .bind(position as i64)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(&mut *tx)
        .await?;
    }

    append_history(&mut tx, id, OrderStatus::Pending, now).await?;
    tx.commit().await?;

    Ok(Order {
        id,
        order_number,
        customer_id: data.customer_id.clone(),
        vendor_id: data.vendor_id,
        total_amount: data.total_amount,
        status: OrderStatus::Pending,
        shipping_info: data.shipping_info.clone(),
        payment_info: data.payment_info.clone(),
        created_at: now,
        updated_at: now,
        items: data.items.clone(),
        history: vec![StatusChange {
            status: OrderStatus::Pending,
            changed_at: now,
        }],
    })
}

/// Delete an order; lines and history cascade
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM customer_order WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} ORDER BY created_at DESC");
    let mut orders = sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?;
    for order in &mut orders {
        load_relations(pool, order).await?;
    }
    Ok(orders)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    match row {
        Some(mut order) => {
            load_relations(pool, &mut order).await?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

pub async fn find_by_number(pool: &SqlitePool, order_number: &str) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE order_number = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(order_number)
        .fetch_optional(pool)
        .await?;
    match row {
        Some(mut order) => {
            load_relations(pool, &mut order).await?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

async fn load_relations(pool: &SqlitePool, order: &mut Order) -> RepoResult<()> {
    order.items = sqlx::query_as::<_, OrderItem>(
        "SELECT product_id, quantity, unit_price FROM order_item WHERE order_id = ? ORDER BY position",
    )
    .bind(order.id)
    .fetch_all(pool)
    .await?;
    order.history = sqlx::query_as::<_, StatusChange>(
        "SELECT status, changed_at FROM order_status_history WHERE order_id = ? ORDER BY changed_at, id",
    )
    .bind(order.id)
    .fetch_all(pool)
    .await?;
    Ok(())
}

/// Compare-and-set status write; `false` if the stored status is not `from`
pub async fn update_status(
    conn: &mut SqliteConnection,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE customer_order SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn append_history(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
    changed_at: i64,
) -> RepoResult<()> {
    sqlx::query("INSERT INTO order_status_history (order_id, status, changed_at) VALUES (?1, ?2, ?3)")
        .bind(order_id)
        .bind(status)
        .bind(changed_at)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Sum of all order totals
pub async fn total_payments(pool: &SqlitePool) -> RepoResult<TotalPayments> {
    let (total_amount, order_count): (f64, i64) =
        sqlx::query_as("SELECT COALESCE(SUM(total_amount), 0.0), COUNT(*) FROM customer_order")
            .fetch_one(pool)
            .await?;
    Ok(TotalPayments {
        total_amount,
        order_count,
    })
}
