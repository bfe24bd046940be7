//! Allocation store traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::allocation_model::{AllocationRecord, AllocationRule, Pot};
use crate::errors::Result;

/// Contract with the external persistence collaborator for pots, rules
/// and allocation records. Every call is scoped by an opaque `user_id`.
///
/// The three mutation methods are each one atomic unit from the caller's
/// perspective: the balance update and its history record land together
/// or not at all. Concurrent allocation runs for the same user are only
/// safe if the store backs `current_balance` updates with per-row atomic
/// increments or optimistic concurrency; the engine sequences its own
/// calls but does not serialize runs against each other.
#[async_trait]
pub trait AllocationRepositoryTrait: Send + Sync {
    fn load_pots(&self, user_id: &str) -> Result<Vec<Pot>>;

    fn get_pot(&self, user_id: &str, pot_id: &str) -> Result<Option<Pot>>;

    /// Enabled rules for the user, ordered by ascending priority.
    fn load_enabled_rules(&self, user_id: &str) -> Result<Vec<AllocationRule>>;

    async fn upsert_rule(&self, user_id: &str, rule: AllocationRule) -> Result<AllocationRule>;

    async fn delete_rule(&self, user_id: &str, rule_id: &str) -> Result<usize>;

    /// Allocation records with dates in `[start, end]`, any order.
    fn load_records_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AllocationRecord>>;

    /// Insert `record` and increment its pot's balance by `record.amount`
    /// in one atomic unit. Returns the pot balance after the increment.
    async fn apply_allocation(&self, user_id: &str, record: AllocationRecord) -> Result<Decimal>;

    /// Debit `amount` from one pot and credit it to another, recording
    /// both legs, in one atomic unit.
    async fn apply_pot_transfer(
        &self,
        user_id: &str,
        from_pot_id: &str,
        to_pot_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<()>;
}
