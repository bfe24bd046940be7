use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::allocation::allocation_model::{
    resolve_rule_amount, AllocationFailure, AllocationRecord, AllocationResult, AllocationRule,
    AllocationSummary, PotAllocationNeed, RuleCadence, RuleSchedule,
};
use crate::allocation::allocation_traits::AllocationRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};

/// Default percentage split seeded for new users, in priority order.
const DEFAULT_SPLITS: [(&str, u32); 5] = [
    ("bills", 40),
    ("food", 15),
    ("transport", 10),
    ("savings", 20),
    ("buffer", 10),
];

pub struct AllocationService<T: AllocationRepositoryTrait> {
    allocation_repo: Arc<T>,
}

impl<T: AllocationRepositoryTrait> AllocationService<T> {
    pub fn new(allocation_repo: Arc<T>) -> Self {
        AllocationService { allocation_repo }
    }

    /// Distribute an incoming amount across pots per the user's enabled
    /// rules.
    ///
    /// Rules are walked strictly in (priority, id) order; each gets
    /// `min(requested, remaining)`. A pot whose persistence fails is
    /// recorded in `errors` and its amount is not re-offered to later
    /// rules, so the priority distribution stays deterministic and the
    /// unmoved funds surface in `remaining_income`.
    pub async fn allocate_income(
        &self,
        user_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<AllocationSummary> {
        if amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Cannot allocate a negative amount: {}",
                amount
            ))));
        }

        let mut rules = self.allocation_repo.load_enabled_rules(user_id)?;
        // The store already orders by priority; re-sort with the id
        // tie-break so equal priorities drain deterministically.
        rules.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));

        let mut remaining = amount;
        let mut total_allocated = Decimal::ZERO;
        let mut allocations = Vec::new();
        let mut errors = Vec::new();

        for rule in &rules {
            if remaining <= Decimal::ZERO {
                break;
            }

            let requested = resolve_rule_amount(rule, amount).max(Decimal::ZERO);
            let allocated = requested.min(remaining);
            if allocated <= Decimal::ZERO {
                continue;
            }
            remaining -= allocated;

            let record = AllocationRecord {
                id: Uuid::new_v4().to_string(),
                pot_id: rule.pot_id.clone(),
                rule_id: Some(rule.id.clone()),
                amount: allocated,
                date,
                status: "completed".to_string(),
                description: None,
            };

            match self.allocation_repo.apply_allocation(user_id, record).await {
                Ok(new_balance) => {
                    total_allocated += allocated;
                    allocations.push(AllocationResult {
                        pot_id: rule.pot_id.clone(),
                        allocated_amount: allocated,
                        remaining_balance: new_balance,
                        rule_applied: Some(rule.id.clone()),
                    });
                }
                Err(e) => {
                    warn!(
                        "allocation of {} to pot {} failed: {}",
                        allocated, rule.pot_id, e
                    );
                    errors.push(AllocationFailure {
                        pot_id: rule.pot_id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        debug!(
            "allocated {} of {} across {} pots for user {} ({} failures)",
            total_allocated,
            amount,
            allocations.len(),
            user_id,
            errors.len()
        );

        Ok(AllocationSummary {
            total_allocated,
            remaining_income: amount - total_allocated,
            allocations,
            errors,
        })
    }

    /// Upsert a rule, rejecting any that points at a pot the user does
    /// not own.
    pub async fn save_allocation_rule(
        &self,
        user_id: &str,
        mut rule: AllocationRule,
    ) -> Result<AllocationRule> {
        match &rule.schedule {
            RuleSchedule::Flat { amount } if *amount < Decimal::ZERO => {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Rule amount cannot be negative: {}",
                    amount
                ))));
            }
            RuleSchedule::PercentageOfIncome { percent }
                if *percent < Decimal::ZERO || *percent > Decimal::ONE_HUNDRED =>
            {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Rule percentage must be between 0 and 100, got {}",
                    percent
                ))));
            }
            _ => {}
        }

        if self.allocation_repo.get_pot(user_id, &rule.pot_id)?.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Rule references unknown pot '{}'",
                rule.pot_id
            ))));
        }

        if rule.id.is_empty() {
            rule.id = Uuid::new_v4().to_string();
        }

        self.allocation_repo.upsert_rule(user_id, rule).await
    }

    pub async fn delete_allocation_rule(&self, user_id: &str, rule_id: &str) -> Result<()> {
        let deleted = self.allocation_repo.delete_rule(user_id, rule_id).await?;
        if deleted == 0 {
            return Err(Error::Validation(ValidationError::NotFound(format!(
                "Allocation rule '{}' does not exist",
                rule_id
            ))));
        }
        Ok(())
    }

    /// Allocation records with dates in `[start, end]`, newest first.
    pub fn get_allocation_history(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AllocationRecord>> {
        if start > end {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "History range start {} is after end {}",
                start, end
            ))));
        }

        let mut records = self
            .allocation_repo
            .load_records_between(user_id, start, end)?;
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(records)
    }

    /// Seed the standard percentage split against the user's pots.
    ///
    /// Categories are matched to pots by case-insensitive name substring;
    /// a category with no matching pot is skipped.
    pub async fn create_default_allocation_rules(
        &self,
        user_id: &str,
    ) -> Result<Vec<AllocationRule>> {
        let pots = self.allocation_repo.load_pots(user_id)?;
        let mut created = Vec::new();

        for (index, (category, percent)) in DEFAULT_SPLITS.iter().enumerate() {
            let matched = pots
                .iter()
                .find(|p| p.name.to_lowercase().contains(category));

            let Some(pot) = matched else {
                warn!(
                    "no pot matching '{}' for user {}, skipping default rule",
                    category, user_id
                );
                continue;
            };

            let rule = AllocationRule {
                id: Uuid::new_v4().to_string(),
                pot_id: pot.id.clone(),
                cadence: RuleCadence::Monthly,
                schedule: RuleSchedule::PercentageOfIncome {
                    percent: Decimal::from(*percent),
                },
                priority: (index + 1) as i32,
                enabled: true,
            };

            let saved = self.allocation_repo.upsert_rule(user_id, rule).await?;
            created.push(saved);
        }

        Ok(created)
    }

    /// Manual single-pot credit. The balance update and its history
    /// record land together or not at all (one repository call).
    pub async fn allocate_to_pot(
        &self,
        user_id: &str,
        pot_id: &str,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<AllocationResult> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Manual allocation amount must be positive, got {}",
                amount
            ))));
        }

        if self.allocation_repo.get_pot(user_id, pot_id)?.is_none() {
            return Err(Error::Validation(ValidationError::NotFound(format!(
                "Pot '{}' does not exist",
                pot_id
            ))));
        }

        let record = AllocationRecord {
            id: Uuid::new_v4().to_string(),
            pot_id: pot_id.to_string(),
            rule_id: None,
            amount,
            date: chrono::Utc::now().date_naive(),
            status: "completed".to_string(),
            description,
        };

        let new_balance = self.allocation_repo.apply_allocation(user_id, record).await?;

        Ok(AllocationResult {
            pot_id: pot_id.to_string(),
            allocated_amount: amount,
            remaining_balance: new_balance,
            rule_applied: None,
        })
    }

    /// Move funds between two pots. Insufficient balance on the source
    /// pot aborts the whole operation before any state change.
    pub async fn transfer_between_pots(
        &self,
        user_id: &str,
        from_pot_id: &str,
        to_pot_id: &str,
        amount: Decimal,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Transfer amount must be positive, got {}",
                amount
            ))));
        }
        if from_pot_id == to_pot_id {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cannot transfer a pot into itself".to_string(),
            )));
        }

        let from_pot = self
            .allocation_repo
            .get_pot(user_id, from_pot_id)?
            .ok_or_else(|| {
                Error::Validation(ValidationError::NotFound(format!(
                    "Pot '{}' does not exist",
                    from_pot_id
                )))
            })?;
        if self.allocation_repo.get_pot(user_id, to_pot_id)?.is_none() {
            return Err(Error::Validation(ValidationError::NotFound(format!(
                "Pot '{}' does not exist",
                to_pot_id
            ))));
        }

        if from_pot.current_balance < amount {
            return Err(Error::Validation(ValidationError::InsufficientFunds(
                format!(
                    "Pot '{}' holds {} but the transfer needs {}",
                    from_pot.name, from_pot.current_balance, amount
                ),
            )));
        }

        self.allocation_repo
            .apply_pot_transfer(
                user_id,
                from_pot_id,
                to_pot_id,
                amount,
                chrono::Utc::now().date_naive(),
            )
            .await
    }

    /// Funding gap per pot against its enabled flat rules.
    pub fn get_pot_allocation_needs(&self, user_id: &str) -> Result<Vec<PotAllocationNeed>> {
        let mut pots = self.allocation_repo.load_pots(user_id)?;
        let rules = self.allocation_repo.load_enabled_rules(user_id)?;
        pots.sort_by_key(|p| p.priority);

        Ok(pots
            .into_iter()
            .map(|pot| {
                let allocation_needed: Decimal = rules
                    .iter()
                    .filter(|r| r.pot_id == pot.id)
                    .filter_map(|r| match &r.schedule {
                        RuleSchedule::Flat { amount } => Some(*amount),
                        // Percentage rules carry no absolute amount
                        // until an income event resolves them.
                        RuleSchedule::PercentageOfIncome { .. } => None,
                    })
                    .sum();

                let shortfall = (allocation_needed - pot.current_balance).max(Decimal::ZERO);

                PotAllocationNeed {
                    pot_id: pot.id,
                    target_amount: pot.target_amount,
                    current_balance: pot.current_balance,
                    allocation_needed,
                    shortfall,
                }
            })
            .collect())
    }
}
