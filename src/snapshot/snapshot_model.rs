use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single booked transaction. Positive amounts are income, negative
/// amounts are expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Option<String>,
}

/// A savings goal the user is working toward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<NaiveDate>,
    pub is_completed: bool,
}

impl Goal {
    /// Amount still missing to reach the target, never negative.
    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }
}

/// An outstanding debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub remaining_amount: f64,
    pub minimum_payment: f64,
    pub due_date: Option<NaiveDate>,
}

/// Read-only view of a user's finances, assembled from the store and fed
/// into scenario projections. `currency` is a display unit only and never
/// enters any computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    /// Transactions ordered ascending by date.
    pub transactions: Vec<TransactionRecord>,
    pub goals: Vec<Goal>,
    pub debts: Vec<Debt>,
    pub starting_balance: f64,
    pub currency: String,
}

impl FinancialSnapshot {
    /// Sum of positive transaction amounts.
    pub fn total_income(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.amount > 0.0)
            .map(|t| t.amount)
            .sum()
    }

    /// Sum of expense magnitudes (negative transaction amounts).
    pub fn total_expenses(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.amount < 0.0)
            .map(|t| -t.amount)
            .sum()
    }

    /// Sum of remaining debt balances.
    pub fn total_debt(&self) -> f64 {
        self.debts.iter().map(|d| d.remaining_amount).sum()
    }
}
