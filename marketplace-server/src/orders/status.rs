//! Order status updates
//!
//! Status changes follow [`OrderStatus::can_transition_to`]. The write is
//! conditional on the status read beforehand, and a delivery credits the
//! vendor wallet inside the same transaction as the status change.

use shared::models::{Order, OrderStatus, OrderStatusUpdate, TransactionDirection};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use super::money;
use crate::db::repository::{order, wallet};

pub async fn update_order_status(pool: &SqlitePool, update: OrderStatusUpdate) -> AppResult<Order> {
    let order_number = update
        .order_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField))?;
    let raw_status = update
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField))?;
    let next = OrderStatus::parse(raw_status).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidStatus,
            format!("Invalid order status '{raw_status}'"),
        )
    })?;

    let credit = if next == OrderStatus::Delivered {
        match (update.vendor_id, update.amount) {
            (Some(vendor_id), Some(amount)) => Some((vendor_id, amount)),
            _ => {
                return Err(AppError::required(
                    "vendorId and amount are required when marking an order Delivered",
                ));
            }
        }
    } else {
        None
    };

    let current = order::find_by_number(pool, order_number)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if current.status.is_terminal() {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Order {order_number} is already {}", current.status),
        ));
    }
    if !current.status.can_transition_to(next) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot change order status from {} to {}", current.status, next),
        ));
    }

    let credit = match credit {
        Some((vendor_id, _)) if vendor_id != current.vendor_id => {
            return Err(AppError::new(ErrorCode::OrderVendorMismatch));
        }
        Some((vendor_id, amount)) => {
            let cents = money::to_cents(amount)
                .filter(|cents| *cents > 0)
                .ok_or_else(|| AppError::new(ErrorCode::InvalidAmount))?;
            Some((vendor_id, cents))
        }
        None => None,
    };

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    if !order::update_status(&mut *tx, current.id, current.status, next, now).await? {
        return Err(AppError::with_message(
            ErrorCode::ConcurrentModification,
            format!("Order {order_number} was modified concurrently"),
        ));
    }
    order::append_history(&mut *tx, current.id, next, now).await?;

    if let Some((vendor_id, cents)) = credit {
        if !wallet::credit_balance(&mut *tx, vendor_id, cents).await? {
            return Err(AppError::new(ErrorCode::VendorNotFound));
        }
        wallet::insert_transaction(
            &mut *tx,
            vendor_id,
            cents,
            TransactionDirection::Credit,
            &format!("Payment for delivered order {order_number}"),
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        order_number = %order_number,
        from = %current.status,
        to = %next,
        "Order status updated"
    );

    order::find_by_id(pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;
    use crate::orders::place_order;
    use shared::models::{
        CartLineInput, PaymentInfo, PaymentMethod, PaymentStatus, PlaceOrderRequest, ShippingInfo,
    };

    async fn placed(pool: &SqlitePool) -> Order {
        let v = testing::seed_vendor(pool, "a").await;
        let p = testing::seed_product(pool, Some(v.id), "P", 40.0, 10).await;
        let request = PlaceOrderRequest {
            customer_id: Some("cust-9".into()),
            products: Some(vec![CartLineInput {
                product_id: Some(p.id),
                quantity: Some(2),
            }]),
            shipping_info: Some(ShippingInfo {
                address: "1 Main".into(),
                city: "Delhi".into(),
                state: "DL".into(),
                postal_code: "110001".into(),
                country: "IN".into(),
                phone_number: "9000000000".into(),
            }),
            payment_info: Some(PaymentInfo {
                method: PaymentMethod::CreditCard,
                status: PaymentStatus::Completed,
            }),
        };
        place_order(pool, request).await.unwrap().remove(0)
    }

    fn update(order: &Order, status: &str) -> OrderStatusUpdate {
        OrderStatusUpdate {
            order_number: Some(order.order_number.clone()),
            status: Some(status.into()),
            vendor_id: None,
            amount: None,
        }
    }

    #[tokio::test]
    async fn walks_forward_and_records_history() {
        let pool = testing::pool().await;
        let order = placed(&pool).await;

        update_order_status(&pool, update(&order, "Processing"))
            .await
            .unwrap();
        let shipped = update_order_status(&pool, update(&order, "Shipped"))
            .await
            .unwrap();

        assert_eq!(shipped.status, OrderStatus::Shipped);
        let trail: Vec<OrderStatus> = shipped.history.iter().map(|h| h.status).collect();
        assert_eq!(
            trail,
            vec![
                OrderStatus::Pending,
                OrderStatus::Processing,
                OrderStatus::Shipped
            ]
        );
    }

    #[tokio::test]
    async fn rejects_unknown_status_and_skipped_steps() {
        let pool = testing::pool().await;
        let order = placed(&pool).await;

        let err = update_order_status(&pool, update(&order, "Lost"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatus);

        let err = update_order_status(&pool, update(&order, "Shipped"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

        let mut missing = update(&order, "Processing");
        missing.order_number = Some("ORD-0".into());
        let err = update_order_status(&pool, missing).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn cancelled_is_final() {
        let pool = testing::pool().await;
        let order = placed(&pool).await;
        update_order_status(&pool, update(&order, "Cancelled"))
            .await
            .unwrap();
        let err = update_order_status(&pool, update(&order, "Processing"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert!(err.message.contains("already Cancelled"), "{}", err.message);
    }

    #[tokio::test]
    async fn delivery_requires_credit_details_and_credits_wallet() {
        let pool = testing::pool().await;
        let order = placed(&pool).await;
        update_order_status(&pool, update(&order, "Processing"))
            .await
            .unwrap();
        update_order_status(&pool, update(&order, "Shipped"))
            .await
            .unwrap();

        let err = update_order_status(&pool, update(&order, "Delivered"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let mut wrong_vendor = update(&order, "Delivered");
        wrong_vendor.vendor_id = Some(order.vendor_id + 1);
        wrong_vendor.amount = Some(80.0);
        let err = update_order_status(&pool, wrong_vendor).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderVendorMismatch);
        assert_eq!(testing::balance_cents(&pool, order.vendor_id).await, 0);

        let mut sub_cent = update(&order, "Delivered");
        sub_cent.vendor_id = Some(order.vendor_id);
        sub_cent.amount = Some(79.999);
        let err = update_order_status(&pool, sub_cent).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);

        let mut delivered = update(&order, "Delivered");
        delivered.vendor_id = Some(order.vendor_id);
        delivered.amount = Some(80.0);
        let done = update_order_status(&pool, delivered).await.unwrap();
        assert_eq!(done.status, OrderStatus::Delivered);
        assert_eq!(testing::balance_cents(&pool, order.vendor_id).await, 8000);

        let log = wallet::list_transactions(&pool, order.vendor_id)
            .await
            .unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].direction, TransactionDirection::Credit);
    }
}
