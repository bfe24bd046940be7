use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named sub-balance (envelope) earmarking funds toward a purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_balance: Decimal,
    /// Lower numbers are allocated first.
    pub priority: i32,
    pub auto_transfer_enabled: bool,
}

/// Derived funding classification, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PotFundingStatus {
    Underfunded,
    Funded,
}

impl Pot {
    /// A pot is underfunded while its balance sits below target and stays
    /// funded until a withdrawal or transfer drops it back under.
    pub fn funding_status(&self) -> PotFundingStatus {
        if self.current_balance >= self.target_amount {
            PotFundingStatus::Funded
        } else {
            PotFundingStatus::Underfunded
        }
    }
}

/// How often a rule is meant to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleCadence {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

/// What a rule requests out of an incoming amount: either a flat figure
/// or a percentage of the income being allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RuleSchedule {
    Flat { amount: Decimal },
    PercentageOfIncome { percent: Decimal },
}

/// A prioritized instruction routing part of incoming funds to a pot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRule {
    pub id: String,
    pub pot_id: String,
    pub cadence: RuleCadence,
    pub schedule: RuleSchedule,
    /// Lower numbers are served first.
    pub priority: i32,
    pub enabled: bool,
}

/// Resolve what a rule asks for out of `income`.
///
/// The single resolution point for the flat/percentage split; nothing
/// else inspects the schedule shape.
pub fn resolve_rule_amount(rule: &AllocationRule, income: Decimal) -> Decimal {
    match &rule.schedule {
        RuleSchedule::Flat { amount } => *amount,
        RuleSchedule::PercentageOfIncome { percent } => {
            income * *percent / Decimal::ONE_HUNDRED
        }
    }
}

/// Persisted allocation-transaction row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub id: String,
    pub pot_id: String,
    pub rule_id: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: String,
    pub description: Option<String>,
}

/// One pot's share of a single allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub pot_id: String,
    pub allocated_amount: Decimal,
    /// Pot balance after the allocation was applied.
    pub remaining_balance: Decimal,
    pub rule_applied: Option<String>,
}

/// A per-pot failure collected during an allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationFailure {
    pub pot_id: String,
    pub message: String,
}

/// Outcome of one `allocate_income` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub total_allocated: Decimal,
    pub allocations: Vec<AllocationResult>,
    /// `amount - total_allocated`; never negative.
    pub remaining_income: Decimal,
    pub errors: Vec<AllocationFailure>,
}

/// Funding gap report for one pot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotAllocationNeed {
    pub pot_id: String,
    pub target_amount: Decimal,
    pub current_balance: Decimal,
    /// Sum of enabled flat rule amounts targeting the pot.
    pub allocation_needed: Decimal,
    /// `max(0, allocation_needed - current_balance)`.
    pub shortfall: Decimal,
}
