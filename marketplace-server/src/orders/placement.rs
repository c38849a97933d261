//! Order placement
//!
//! A cart may mix products from several vendors. It is split into one order
//! per vendor, in the order vendors first appear in the cart. Stock is only
//! taken after every order is staged, one transaction per order, so a
//! failure affects the failing order and the ones after it while orders
//! committed before it stand.

use shared::models::{CartLineInput, Order, OrderItem, PlaceOrderRequest};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::db::repository::order::{self, NewOrder};
use crate::db::repository::product;
use crate::orders::money;

/// Lines of one vendor, priced from the catalog
#[derive(Debug)]
struct VendorGroup {
    vendor_id: i64,
    items: Vec<OrderItem>,
}

/// Place a cart, producing one committed order per vendor
pub async fn place_order(pool: &SqlitePool, request: PlaceOrderRequest) -> AppResult<Vec<Order>> {
    let (Some(customer_id), Some(lines), Some(shipping_info), Some(payment_info)) = (
        request.customer_id,
        request.products,
        request.shipping_info,
        request.payment_info,
    ) else {
        return Err(AppError::new(ErrorCode::RequiredField));
    };

    let customer_id = customer_id.trim().to_string();
    if customer_id.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField));
    }
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if let Some(field) = shipping_info.missing_field() {
        return Err(AppError::required(format!("Shipping {field} is required")));
    }

    let groups = partition_by_vendor(pool, &lines).await?;

    let mut drafts = Vec::with_capacity(groups.len());
    for group in groups {
        let total_amount = money::order_total(&group.items)
            .ok_or_else(|| AppError::new(ErrorCode::OrderTotalInvalid))?;
        drafts.push(NewOrder {
            customer_id: customer_id.clone(),
            vendor_id: group.vendor_id,
            items: group.items,
            total_amount,
            shipping_info: shipping_info.clone(),
            payment_info: payment_info.clone(),
        });
    }

    let staged = stage_orders(pool, &drafts).await?;
    let committed = commit_staged(pool, &staged).await?;

    tracing::info!(
        customer_id = %customer_id,
        orders = committed.len(),
        "Orders placed"
    );
    Ok(committed)
}

/// Validate every line and group by vendor without writing anything
async fn partition_by_vendor(
    pool: &SqlitePool,
    lines: &[CartLineInput],
) -> AppResult<Vec<VendorGroup>> {
    let mut groups: Vec<VendorGroup> = Vec::new();

    for line in lines {
        let (Some(product_id), Some(quantity)) = (line.product_id, line.quantity) else {
            return Err(AppError::required("Each product needs productId and quantity"));
        };
        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity for product {product_id} must be greater than zero"
            )));
        }

        let found = product::find_by_id(pool, product_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {product_id} not found"),
            )
        })?;
        if quantity > found.stock {
            return Err(AppError::with_message(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock for product {}", found.title),
            ));
        }
        let vendor_id = found.vendor_id.ok_or_else(|| {
            AppError::invalid_request(format!("Vendor not found for product {product_id}"))
        })?;

        let item = OrderItem {
            product_id,
            quantity,
            unit_price: found.price,
        };
        match groups.iter_mut().find(|g| g.vendor_id == vendor_id) {
            Some(group) => group.items.push(item),
            None => groups.push(VendorGroup {
                vendor_id,
                items: vec![item],
            }),
        }
    }

    Ok(groups)
}

async fn stage_orders(pool: &SqlitePool, drafts: &[NewOrder]) -> AppResult<Vec<Order>> {
    let mut staged = Vec::with_capacity(drafts.len());
    for draft in drafts {
        match order::insert_pending(pool, draft).await {
            Ok(created) => staged.push(created),
            Err(e) => {
                discard(pool, &staged).await;
                return Err(e.into());
            }
        }
    }
    Ok(staged)
}

/// Take stock order by order
///
/// On the first failure that order and every later one are deleted; orders
/// committed before it are kept.
async fn commit_staged(pool: &SqlitePool, staged: &[Order]) -> AppResult<Vec<Order>> {
    let mut committed = Vec::with_capacity(staged.len());
    for (idx, staged_order) in staged.iter().enumerate() {
        if let Err(e) = commit_stock(pool, staged_order).await {
            tracing::warn!(
                order_number = %staged_order.order_number,
                vendor_id = staged_order.vendor_id,
                committed = committed.len(),
                error = %e,
                "Stock commit failed, removing uncommitted orders"
            );
            discard(pool, &staged[idx..]).await;
            return Err(e);
        }
        committed.push(staged_order.clone());
    }
    Ok(committed)
}

/// Take stock for every line of one order, all or nothing
async fn commit_stock(pool: &SqlitePool, staged: &Order) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    for item in &staged.items {
        if product::decrement_stock(&mut *tx, item.product_id, item.quantity).await? {
            continue;
        }
        let still_exists = product::exists(&mut *tx, item.product_id).await?;
        tx.rollback().await?;
        return Err(if still_exists {
            AppError::with_message(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock for product {}", item.product_id),
            )
        } else {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", item.product_id),
            )
        });
    }
    tx.commit().await?;
    Ok(())
}

/// Compensating delete for orders whose stock was never taken
async fn discard(pool: &SqlitePool, orders: &[Order]) {
    for stale in orders {
        if let Err(e) = order::delete(pool, stale.id).await {
            tracing::error!(
                order_number = %stale.order_number,
                error = %e,
                "Failed to remove uncommitted order"
            );
        }
    }
}
