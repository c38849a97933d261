//! Wallet Models (transactions and withdrawal requests)

use super::product::NumericInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TransactionDirection {
    Credit,
    Debit,
}

/// Wallet ledger entry (append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WalletTransaction {
    pub id: i64,
    pub vendor_id: i64,
    /// Always positive; sign comes from `direction`
    pub amount: f64,
    #[serde(rename = "type")]
    pub direction: TransactionDirection,
    pub description: String,
    pub created_at: i64,
}

impl WalletTransaction {
    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            TransactionDirection::Credit => self.amount,
            TransactionDirection::Debit => -self.amount,
        }
    }
}

/// Withdrawal request status
///
/// `pending` may become `approved` or `rejected`; both are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: WithdrawalStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl std::fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WithdrawalRequest {
    pub id: i64,
    pub vendor_id: i64,
    pub amount: f64,
    pub status: WithdrawalStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Withdrawal request payload (vendor taken from the bearer token)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WithdrawalCreate {
    pub amount: Option<NumericInput>,
}

/// Approve/reject payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalStatusUpdate {
    pub request_id: Option<i64>,
    pub status: Option<String>,
}

/// Delivery credit payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCredit {
    pub vendor_id: Option<i64>,
    pub amount: Option<NumericInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub vendor_id: i64,
    pub wallet_balance: f64,
    pub transactions: Vec<WalletTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_moves() {
        use WithdrawalStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn parse_accepts_only_known_values() {
        assert_eq!(WithdrawalStatus::parse("approved"), Some(WithdrawalStatus::Approved));
        assert_eq!(WithdrawalStatus::parse("Approved"), None);
        assert_eq!(WithdrawalStatus::parse("paid"), None);
    }

    #[test]
    fn signed_amount_follows_direction() {
        let mut tx = WalletTransaction {
            id: 1,
            vendor_id: 1,
            amount: 25.0,
            direction: TransactionDirection::Credit,
            description: "Delivered order".into(),
            created_at: 0,
        };
        assert_eq!(tx.signed_amount(), 25.0);
        tx.direction = TransactionDirection::Debit;
        assert_eq!(tx.signed_amount(), -25.0);
    }
}
