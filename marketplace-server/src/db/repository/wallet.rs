//! Wallet Repository
//!
//! Balance writes and ledger rows. Every function here takes a connection so
//! callers can put the balance change and its ledger row in one transaction.
//!
//! Money is stored as whole cents; reads convert back to currency units.

use super::{RepoError, RepoResult};
use shared::models::{TransactionDirection, WalletTransaction, WithdrawalRequest, WithdrawalStatus};
use sqlx::{SqliteConnection, SqlitePool};

const WITHDRAWAL_SELECT: &str = "SELECT id, vendor_id, amount_cents / 100.0 AS amount, status, created_at, updated_at FROM withdrawal_request";

const TRANSACTION_SELECT: &str = "SELECT id, vendor_id, amount_cents / 100.0 AS amount, direction, description, created_at FROM wallet_transaction";

/// Add to a vendor's balance; `false` if the vendor does not exist
pub async fn credit_balance(
    conn: &mut SqliteConnection,
    vendor_id: i64,
    amount_cents: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE vendor SET wallet_balance_cents = wallet_balance_cents + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(amount_cents)
    .bind(now)
    .bind(vendor_id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Conditional debit
///
/// `false` when the vendor is missing or the balance is below the amount.
pub async fn debit_balance(
    conn: &mut SqliteConnection,
    vendor_id: i64,
    amount_cents: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE vendor SET wallet_balance_cents = wallet_balance_cents - ?1, updated_at = ?2 WHERE id = ?3 AND wallet_balance_cents >= ?1",
    )
    .bind(amount_cents)
    .bind(now)
    .bind(vendor_id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn insert_transaction(
    conn: &mut SqliteConnection,
    vendor_id: i64,
    amount_cents: i64,
    direction: TransactionDirection,
    description: &str,
) -> RepoResult<WalletTransaction> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO wallet_transaction (id, vendor_id, amount_cents, direction, description, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(vendor_id)
    .bind(amount_cents)
    .bind(direction)
    .bind(description)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    let sql = format!("{TRANSACTION_SELECT} WHERE id = ?");
    sqlx::query_as::<_, WalletTransaction>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to record wallet transaction".into()))
}

pub async fn list_transactions(
    pool: &SqlitePool,
    vendor_id: i64,
) -> RepoResult<Vec<WalletTransaction>> {
    let sql = format!("{TRANSACTION_SELECT} WHERE vendor_id = ? ORDER BY created_at, id");
    let rows = sqlx::query_as::<_, WalletTransaction>(&sql)
        .bind(vendor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert_withdrawal(
    conn: &mut SqliteConnection,
    vendor_id: i64,
    amount_cents: i64,
) -> RepoResult<WithdrawalRequest> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO withdrawal_request (id, vendor_id, amount_cents, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(vendor_id)
    .bind(amount_cents)
    .bind(WithdrawalStatus::Pending)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    let sql = format!("{WITHDRAWAL_SELECT} WHERE id = ?");
    sqlx::query_as::<_, WithdrawalRequest>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create withdrawal request".into()))
}

pub async fn find_withdrawal(pool: &SqlitePool, id: i64) -> RepoResult<Option<WithdrawalRequest>> {
    let sql = format!("{WITHDRAWAL_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, WithdrawalRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_withdrawals(pool: &SqlitePool) -> RepoResult<Vec<WithdrawalRequest>> {
    let sql = format!("{WITHDRAWAL_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, WithdrawalRequest>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Compare-and-set status write
///
/// Only succeeds while the stored status still equals `from`.
pub async fn update_withdrawal_status(
    pool: &SqlitePool,
    id: i64,
    from: WithdrawalStatus,
    to: WithdrawalStatus,
) -> RepoResult<WithdrawalRequest> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE withdrawal_request SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Validation(format!(
            "Withdrawal request {id} is no longer {from}"
        )));
    }
    find_withdrawal(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Withdrawal request {id} not found")))
}
