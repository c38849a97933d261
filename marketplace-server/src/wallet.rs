//! Vendor wallet ledger
//!
//! Every balance change is paired with a [`WalletTransaction`] row in the
//! same database transaction. Debits are conditional on the balance
//! covering them, so the balance never goes negative.
//!
//! Amounts are handled as whole cents, so sums never drift.
//!
//! Rejecting a withdrawal does not refund the debited amount.

use shared::models::{
    DeliveryCredit, NumericInput, TransactionDirection, WalletSummary, WalletTransaction,
    WithdrawalCreate, WithdrawalRequest, WithdrawalStatus, WithdrawalStatusUpdate,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, vendor, wallet};
use crate::orders::money;

/// Positive amount with at most 2 decimal places, in cents
fn parse_amount(amount: &Option<NumericInput>) -> AppResult<i64> {
    amount
        .as_ref()
        .and_then(NumericInput::as_f64)
        .and_then(money::to_cents)
        .filter(|cents| *cents > 0)
        .ok_or_else(|| AppError::new(ErrorCode::InvalidAmount))
}

/// Debit the wallet and open a pending withdrawal request
pub async fn request_withdrawal(
    pool: &SqlitePool,
    vendor_id: i64,
    data: WithdrawalCreate,
) -> AppResult<WithdrawalRequest> {
    let cents = parse_amount(&data.amount)?;

    let mut tx = pool.begin().await?;
    if !wallet::debit_balance(&mut *tx, vendor_id, cents).await? {
        let known = vendor::exists(&mut *tx, vendor_id).await?;
        tx.rollback().await?;
        return Err(if known {
            AppError::new(ErrorCode::InsufficientBalance)
        } else {
            AppError::new(ErrorCode::VendorNotFound)
        });
    }
    let request = wallet::insert_withdrawal(&mut *tx, vendor_id, cents).await?;
    wallet::insert_transaction(
        &mut *tx,
        vendor_id,
        cents,
        TransactionDirection::Debit,
        &format!("Withdrawal request {}", request.id),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(vendor_id, request_id = request.id, cents, "Withdrawal requested");
    Ok(request)
}

/// Approve or reject a pending withdrawal
pub async fn update_withdrawal_status(
    pool: &SqlitePool,
    data: WithdrawalStatusUpdate,
) -> AppResult<WithdrawalRequest> {
    let (Some(request_id), Some(raw_status)) = (data.request_id, data.status.as_deref()) else {
        return Err(AppError::new(ErrorCode::RequiredField));
    };
    let next = WithdrawalStatus::parse(raw_status.trim()).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidStatus,
            format!("Invalid withdrawal status '{raw_status}'"),
        )
    })?;

    let current = wallet::find_withdrawal(pool, request_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::WithdrawalNotFound))?;
    if !current.status.can_transition_to(next) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!(
                "Cannot change withdrawal status from {} to {}",
                current.status, next
            ),
        ));
    }

    let updated = wallet::update_withdrawal_status(pool, request_id, current.status, next)
        .await
        .map_err(|e| match e {
            RepoError::Validation(msg) => {
                AppError::with_message(ErrorCode::ConcurrentModification, msg)
            }
            other => other.into(),
        })?;

    tracing::info!(request_id, from = %current.status, to = %next, "Withdrawal status updated");
    Ok(updated)
}

/// Credit a vendor for a delivered product
pub async fn add_delivered_product_transaction(
    pool: &SqlitePool,
    data: DeliveryCredit,
) -> AppResult<WalletTransaction> {
    let vendor_id = data
        .vendor_id
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField))?;
    let cents = parse_amount(&data.amount)?;

    let mut tx = pool.begin().await?;
    if !wallet::credit_balance(&mut *tx, vendor_id, cents).await? {
        tx.rollback().await?;
        return Err(AppError::new(ErrorCode::VendorNotFound));
    }
    let entry = wallet::insert_transaction(
        &mut *tx,
        vendor_id,
        cents,
        TransactionDirection::Credit,
        "Payment for delivered product",
    )
    .await?;
    tx.commit().await?;

    tracing::info!(vendor_id, cents, "Delivery credit recorded");
    Ok(entry)
}

pub async fn list_withdrawals(pool: &SqlitePool) -> AppResult<Vec<WithdrawalRequest>> {
    Ok(wallet::list_withdrawals(pool).await?)
}

/// Balance and ledger of one vendor
pub async fn wallet_summary(pool: &SqlitePool, vendor_id: i64) -> AppResult<WalletSummary> {
    let found = vendor::find_by_id(pool, vendor_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VendorNotFound))?;
    let transactions = wallet::list_transactions(pool, vendor_id).await?;
    Ok(WalletSummary {
        vendor_id,
        wallet_balance: found.wallet_balance,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;

    fn withdraw(amount: &str) -> WithdrawalCreate {
        WithdrawalCreate {
            amount: Some(NumericInput::from(amount)),
        }
    }

    fn decide(request_id: i64, status: &str) -> WithdrawalStatusUpdate {
        WithdrawalStatusUpdate {
            request_id: Some(request_id),
            status: Some(status.into()),
        }
    }

    fn credit(vendor_id: i64, amount: f64) -> DeliveryCredit {
        DeliveryCredit {
            vendor_id: Some(vendor_id),
            amount: Some(NumericInput::from(amount)),
        }
    }

    async fn assert_ledger_matches(pool: &SqlitePool, vendor_id: i64) -> i64 {
        let balance = testing::balance_cents(pool, vendor_id).await;
        assert_eq!(balance, testing::ledger_sum_cents(pool, vendor_id).await);
        balance
    }

    #[tokio::test]
    async fn new_vendor_starts_empty() {
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;
        let summary = wallet_summary(&pool, v.id).await.unwrap();
        assert_eq!(summary.wallet_balance, 0.0);
        assert!(summary.transactions.is_empty());
    }

    #[tokio::test]
    async fn withdrawal_debits_and_logs() {
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;
        testing::set_balance(&pool, v.id, 100.0).await;

        let request = request_withdrawal(&pool, v.id, withdraw("40"))
            .await
            .unwrap();
        assert_eq!(request.status, WithdrawalStatus::Pending);
        assert_eq!(request.amount, 40.0);

        let summary = wallet_summary(&pool, v.id).await.unwrap();
        assert_eq!(summary.wallet_balance, 60.0);
        assert_eq!(summary.transactions.len(), 1);
        assert_eq!(summary.transactions[0].signed_amount(), -40.0);
    }

    #[tokio::test]
    async fn overdraw_changes_nothing() {
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;
        testing::set_balance(&pool, v.id, 10.0).await;

        let err = request_withdrawal(&pool, v.id, withdraw("10.01"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientBalance);

        let summary = wallet_summary(&pool, v.id).await.unwrap();
        assert_eq!(summary.wallet_balance, 10.0);
        assert!(summary.transactions.is_empty());
        assert!(list_withdrawals(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_amounts_are_rejected() {
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;
        testing::set_balance(&pool, v.id, 10.0).await;

        for bad in ["0", "-5", "ten", "NaN", "inf", "0.001", "1.005"] {
            let err = request_withdrawal(&pool, v.id, withdraw(bad))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidAmount, "amount {bad}");
        }
        let err = request_withdrawal(&pool, v.id, WithdrawalCreate { amount: None })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
    }

    #[tokio::test]
    async fn unknown_vendor_cannot_withdraw() {
        let pool = testing::pool().await;
        let err = request_withdrawal(&pool, 42, withdraw("1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::VendorNotFound);
    }

    #[tokio::test]
    async fn rejection_keeps_the_debit() {
        // Known gap: a rejected withdrawal is not refunded.
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;
        testing::set_balance(&pool, v.id, 50.0).await;

        let request = request_withdrawal(&pool, v.id, withdraw("20"))
            .await
            .unwrap();
        let rejected = update_withdrawal_status(&pool, decide(request.id, "rejected"))
            .await
            .unwrap();
        assert_eq!(rejected.status, WithdrawalStatus::Rejected);

        let summary = wallet_summary(&pool, v.id).await.unwrap();
        assert_eq!(summary.wallet_balance, 30.0);
        assert_eq!(summary.transactions.len(), 1);
    }

    #[tokio::test]
    async fn decided_requests_are_final() {
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;
        testing::set_balance(&pool, v.id, 50.0).await;
        let request = request_withdrawal(&pool, v.id, withdraw("20"))
            .await
            .unwrap();

        update_withdrawal_status(&pool, decide(request.id, "approved"))
            .await
            .unwrap();
        for next in ["rejected", "pending", "approved"] {
            let err = update_withdrawal_status(&pool, decide(request.id, next))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        }

        let err = update_withdrawal_status(&pool, decide(request.id, "paid"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatus);

        let err = update_withdrawal_status(&pool, decide(7, "approved"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WithdrawalNotFound);
    }

    #[tokio::test]
    async fn delivery_credit_adds_to_balance() {
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;

        let entry = add_delivered_product_transaction(
            &pool,
            DeliveryCredit {
                vendor_id: Some(v.id),
                amount: Some(NumericInput::from(125.5)),
            },
        )
        .await
        .unwrap();
        assert_eq!(entry.direction, TransactionDirection::Credit);

        let summary = wallet_summary(&pool, v.id).await.unwrap();
        assert_eq!(summary.wallet_balance, 125.5);

        let err = add_delivered_product_transaction(
            &pool,
            DeliveryCredit {
                vendor_id: Some(v.id + 1),
                amount: Some(NumericInput::from(1.0)),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::VendorNotFound);
    }

    #[tokio::test]
    async fn fractional_amounts_do_not_drift() {
        let pool = testing::pool().await;
        let v = testing::seed_vendor(&pool, "a").await;

        add_delivered_product_transaction(&pool, credit(v.id, 0.3))
            .await
            .unwrap();
        request_withdrawal(&pool, v.id, withdraw("0.1"))
            .await
            .unwrap();
        request_withdrawal(&pool, v.id, withdraw("0.2"))
            .await
            .unwrap();

        let summary = wallet_summary(&pool, v.id).await.unwrap();
        assert_eq!(summary.wallet_balance, 0.0);
        assert_eq!(summary.transactions.len(), 3);
        assert_eq!(assert_ledger_matches(&pool, v.id).await, 0);

        let err = request_withdrawal(&pool, v.id, withdraw("0.01"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientBalance);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_withdrawals_never_overdraw() {
        let (_dir, pool) = testing::file_pool().await;
        let vendor_id = testing::seed_vendor(&pool, "a").await.id;
        add_delivered_product_transaction(&pool, credit(vendor_id, 100.0))
            .await
            .unwrap();

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(
                    async move { request_withdrawal(&pool, vendor_id, withdraw("60")).await },
                )
            })
            .collect();
        let mut results = Vec::new();
        for task in tasks {
            results.push(task.await.unwrap());
        }

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let err = results.into_iter().find_map(Result::err).unwrap();
        assert_eq!(err.code, ErrorCode::InsufficientBalance);

        assert_eq!(assert_ledger_matches(&pool, vendor_id).await, 4000);
        assert_eq!(list_withdrawals(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn withdrawal_racing_a_credit_keeps_both() {
        let (_dir, pool) = testing::file_pool().await;
        let vendor_id = testing::seed_vendor(&pool, "a").await.id;
        add_delivered_product_transaction(&pool, credit(vendor_id, 50.0))
            .await
            .unwrap();

        let debit_task = {
            let pool = pool.clone();
            tokio::spawn(async move { request_withdrawal(&pool, vendor_id, withdraw("50")).await })
        };
        let credit_task = {
            let pool = pool.clone();
            tokio::spawn(async move {
                add_delivered_product_transaction(&pool, credit(vendor_id, 25.5)).await
            })
        };
        debit_task.await.unwrap().unwrap();
        credit_task.await.unwrap().unwrap();

        assert_eq!(assert_ledger_matches(&pool, vendor_id).await, 2550);
        let summary = wallet_summary(&pool, vendor_id).await.unwrap();
        assert_eq!(summary.wallet_balance, 25.5);
        assert_eq!(summary.transactions.len(), 3);
    }
}
