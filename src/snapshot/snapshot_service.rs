use std::sync::Arc;

use num_traits::ToPrimitive;

use crate::errors::Result;
use crate::snapshot::snapshot_model::{Debt, FinancialSnapshot, Goal, TransactionRecord};
use crate::snapshot::snapshot_traits::SnapshotRepositoryTrait;

pub struct SnapshotService<T: SnapshotRepositoryTrait> {
    snapshot_repo: Arc<T>,
}

impl<T: SnapshotRepositoryTrait> SnapshotService<T> {
    pub fn new(snapshot_repo: Arc<T>) -> Self {
        SnapshotService { snapshot_repo }
    }

    /// Assemble the projection input for a user from the store.
    ///
    /// Store amounts are decimals; the projection math runs on f64, so
    /// each amount is converted on the way in. Transactions are ordered
    /// ascending by date regardless of store ordering.
    pub async fn build_snapshot(&self, user_id: &str) -> Result<FinancialSnapshot> {
        let stored_transactions = self.snapshot_repo.load_transactions(user_id).await?;
        let stored_goals = self.snapshot_repo.load_goals(user_id).await?;
        let stored_debts = self.snapshot_repo.load_debts(user_id).await?;
        let starting_balance = self.snapshot_repo.get_starting_balance(user_id).await?;
        let currency = self.snapshot_repo.get_currency(user_id).await?;

        let mut transactions: Vec<TransactionRecord> = stored_transactions
            .into_iter()
            .map(|t| TransactionRecord {
                date: t.date,
                amount: t.amount.to_f64().unwrap_or(0.0),
                category: t.category,
            })
            .collect();
        transactions.sort_by_key(|t| t.date);

        let goals = stored_goals
            .into_iter()
            .map(|g| Goal {
                id: g.id,
                target_amount: g.target_amount.to_f64().unwrap_or(0.0),
                current_amount: g.current_amount.to_f64().unwrap_or(0.0),
                deadline: g.deadline,
                is_completed: g.is_completed,
            })
            .collect();

        let debts = stored_debts
            .into_iter()
            .map(|d| Debt {
                id: d.id,
                remaining_amount: d.remaining_amount.to_f64().unwrap_or(0.0),
                minimum_payment: d.minimum_payment.to_f64().unwrap_or(0.0),
                due_date: d.due_date,
            })
            .collect();

        Ok(FinancialSnapshot {
            transactions,
            goals,
            debts,
            starting_balance: starting_balance.to_f64().unwrap_or(0.0),
            currency,
        })
    }
}
