//! Snapshot repository traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;

/// A transaction row as the store keeps it, before conversion into the
/// projection domain.
#[derive(Debug, Clone)]
pub struct StoredTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Option<String>,
}

/// A goal row as the store keeps it.
#[derive(Debug, Clone)]
pub struct StoredGoal {
    pub id: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub is_completed: bool,
}

/// A debt row as the store keeps it.
#[derive(Debug, Clone)]
pub struct StoredDebt {
    pub id: String,
    pub remaining_amount: Decimal,
    pub minimum_payment: Decimal,
    pub due_date: Option<NaiveDate>,
}

/// Read-side contract for assembling a [`FinancialSnapshot`] from the
/// external store. All reads are scoped by an opaque `user_id` supplied by
/// the caller; authentication is entirely the host's concern.
///
/// [`FinancialSnapshot`]: crate::snapshot::FinancialSnapshot
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    async fn load_transactions(&self, user_id: &str) -> Result<Vec<StoredTransaction>>;

    async fn load_goals(&self, user_id: &str) -> Result<Vec<StoredGoal>>;

    async fn load_debts(&self, user_id: &str) -> Result<Vec<StoredDebt>>;

    async fn get_starting_balance(&self, user_id: &str) -> Result<Decimal>;

    async fn get_currency(&self, user_id: &str) -> Result<String>;
}
