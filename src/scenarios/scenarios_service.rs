use std::collections::HashMap;

use chrono::{Months, NaiveDate, Utc};
use log::debug;
use uuid::Uuid;

use crate::scenarios::result_cache::{changes_content_hash, ScenarioResultCache};
use crate::scenarios::scenarios_model::{
    ChangeFrequency, ChangeKind, KeyMetrics, ScenarioChange, ScenarioComparison, ScenarioResult,
    ScenarioStanding, TimelineEvent, TimelineEventKind, WhatIfScenario,
};
use crate::snapshot::FinancialSnapshot;

/// Recurring changes with no end date are clipped this many months past
/// the projection anchor.
const PROJECTION_MONTHS: u32 = 12;

const BASE_RISK_SCORE: i32 = 5;
const BASE_PROBABILITY: i32 = 70;
/// Any single change above this magnitude bumps the risk score.
const LARGE_CHANGE_THRESHOLD: f64 = 1000.0;

/// Running totals a projection is reduced to before metrics fall out.
#[derive(Debug, Clone, Copy)]
struct ProjectionTotals {
    income: f64,
    expenses: f64,
    debt: f64,
    /// Asset value added outside the cash flow (investment changes).
    extra_assets: f64,
}

impl ProjectionTotals {
    fn from_snapshot(snapshot: &FinancialSnapshot) -> Self {
        ProjectionTotals {
            income: snapshot.total_income(),
            expenses: snapshot.total_expenses(),
            debt: snapshot.total_debt(),
            extra_assets: 0.0,
        }
    }

    fn net_worth(&self, starting_balance: f64) -> f64 {
        starting_balance + self.income - self.expenses - self.debt + self.extra_assets
    }

    /// Assets before liabilities, used for the emergency-fund figure.
    fn net_assets(&self, starting_balance: f64) -> f64 {
        starting_balance + self.income - self.expenses + self.extra_assets
    }

    fn metrics(&self, starting_balance: f64) -> KeyMetrics {
        // Snapshot totals are the annualized figures.
        let monthly_cash_flow = (self.income - self.expenses) / 12.0;
        let monthly_income = self.income / 12.0;
        let monthly_expenses = self.expenses / 12.0;

        let savings_rate = if self.income > 0.0 {
            (self.income - self.expenses) / self.income * 100.0
        } else {
            0.0
        };
        let debt_to_income = if monthly_income > 0.0 {
            self.debt / monthly_income * 100.0
        } else {
            0.0
        };
        let emergency_fund_months = if monthly_expenses > 0.0 {
            self.net_assets(starting_balance) / monthly_expenses
        } else {
            0.0
        };

        KeyMetrics {
            monthly_cash_flow,
            savings_rate,
            debt_to_income,
            emergency_fund_months,
        }
    }
}

/// The date the projection window and timeline hang off: the earliest
/// modified change, or the scenario's creation date when there are no
/// changes.
fn projection_anchor(scenario: &WhatIfScenario) -> NaiveDate {
    scenario
        .modified_changes
        .iter()
        .map(|c| c.start_date)
        .min()
        .unwrap_or_else(|| scenario.created_at.date_naive())
}

/// Dates a change fires on. The projection window end is exclusive, so
/// a monthly change with no end date yields exactly twelve occurrences
/// per projected year; an explicit end date is inclusive.
fn change_occurrences(change: &ScenarioChange, window_end: NaiveDate) -> Vec<NaiveDate> {
    let step = match change.frequency {
        ChangeFrequency::OneTime => {
            if change.start_date < window_end {
                return vec![change.start_date];
            }
            return Vec::new();
        }
        ChangeFrequency::Monthly => 1,
        ChangeFrequency::Quarterly => 3,
        ChangeFrequency::Yearly => 12,
    };

    let mut dates = Vec::new();
    let mut index = 0u32;
    loop {
        let Some(date) = change
            .start_date
            .checked_add_months(Months::new(index * step))
        else {
            break;
        };
        if date >= window_end {
            break;
        }
        if change.end_date.is_some_and(|end| date > end) {
            break;
        }
        dates.push(date);
        index += 1;
    }
    dates
}

/// Months of positive cash flow needed to clear `balance`. `None` when
/// the balance can never clear at the given cash flow.
fn months_until_cleared(balance: f64, monthly_cash_flow: f64) -> Option<f64> {
    if balance <= 0.0 {
        return Some(0.0);
    }
    if monthly_cash_flow <= 0.0 {
        return None;
    }
    Some((balance / monthly_cash_flow).ceil())
}

/// Compute a scenario's impact against the snapshot baseline.
///
/// Pure function of `(snapshot, scenario.modified_changes, created_at)`:
/// repeatable, no hidden state. Malformed inputs degrade to neutral
/// defaults rather than failing.
pub fn calculate_scenario_impact(
    snapshot: &FinancialSnapshot,
    scenario: &WhatIfScenario,
) -> ScenarioResult {
    let anchor = projection_anchor(scenario);
    let window_end = anchor
        .checked_add_months(Months::new(PROJECTION_MONTHS))
        .unwrap_or(anchor);

    let baseline = ProjectionTotals::from_snapshot(snapshot);
    let mut modified = baseline;

    let mut timeline = vec![TimelineEvent {
        date: anchor,
        kind: TimelineEventKind::Milestone,
        amount: 0.0,
        description: "Scenario start".to_string(),
        category: None,
    }];

    for change in &scenario.modified_changes {
        let occurrences = change_occurrences(change, window_end);
        let contribution = change.amount * occurrences.len() as f64;

        match change.kind {
            ChangeKind::Income => modified.income += contribution,
            ChangeKind::Expense => modified.expenses += contribution,
            ChangeKind::Debt => modified.debt += contribution,
            ChangeKind::Investment => modified.extra_assets += contribution,
            // Goal contributions earmark funds rather than create or
            // destroy wealth; they only show on the timeline.
            ChangeKind::Goal => {}
        }

        for date in occurrences {
            timeline.push(TimelineEvent {
                date,
                kind: change.kind.into(),
                amount: change.amount,
                description: change.name.clone(),
                category: change.category.clone(),
            });
        }
    }

    timeline.sort_by_key(|e| e.date);

    let baseline_metrics = baseline.metrics(snapshot.starting_balance);
    let modified_metrics = modified.metrics(snapshot.starting_balance);
    let net_worth_impact =
        modified.net_worth(snapshot.starting_balance) - baseline.net_worth(snapshot.starting_balance);

    let mut goal_timeline_changes = HashMap::new();
    for goal in snapshot.goals.iter().filter(|g| !g.is_completed) {
        let remaining = goal.remaining_amount();
        let shift = match (
            months_until_cleared(remaining, baseline_metrics.monthly_cash_flow),
            months_until_cleared(remaining, modified_metrics.monthly_cash_flow),
        ) {
            (Some(before), Some(after)) => (after - before) as i32,
            _ => 0,
        };
        goal_timeline_changes.insert(goal.id.clone(), shift);
    }

    let debt_free_date_change = match (
        months_until_cleared(baseline.debt, baseline_metrics.monthly_cash_flow),
        months_until_cleared(modified.debt, modified_metrics.monthly_cash_flow),
    ) {
        (Some(before), Some(after)) => (after - before) as i32,
        _ => 0,
    };

    let mut risk = BASE_RISK_SCORE;
    let mut probability = BASE_PROBABILITY;
    for change in &scenario.modified_changes {
        match change.kind {
            ChangeKind::Debt => risk += 2,
            ChangeKind::Expense => risk += 1,
            ChangeKind::Income => probability -= 10,
            ChangeKind::Investment => probability -= 20,
            ChangeKind::Goal => {}
        }
        if change.amount.abs() > LARGE_CHANGE_THRESHOLD {
            risk += 1;
        }
    }

    ScenarioResult {
        net_worth_impact,
        goal_timeline_changes,
        debt_free_date_change,
        risk_score: risk.clamp(1, 10) as u8,
        probability: probability.clamp(0, 100) as u8,
        key_metrics: modified_metrics,
        timeline,
    }
}

/// Builds, evaluates and ranks what-if scenarios over a financial
/// snapshot. Computation is pure; the service only adds the result
/// cache in front of it.
pub struct ScenarioService {
    result_cache: ScenarioResultCache,
}

impl ScenarioService {
    pub fn new() -> Self {
        ScenarioService {
            result_cache: ScenarioResultCache::new(),
        }
    }

    /// Pure construction; assigns the id and creation timestamp and
    /// computes nothing.
    pub fn create_scenario(
        &self,
        name: String,
        description: String,
        base_changes: Vec<ScenarioChange>,
        modified_changes: Vec<ScenarioChange>,
    ) -> WhatIfScenario {
        WhatIfScenario {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            created_at: Utc::now(),
            base_changes,
            modified_changes,
        }
    }

    /// Cached wrapper around [`calculate_scenario_impact`]. A hit is
    /// only served while the scenario's `modified_changes` hash to the
    /// stored key, so edits invalidate wholesale.
    pub async fn impact_for(
        &self,
        snapshot: &FinancialSnapshot,
        scenario: &WhatIfScenario,
    ) -> ScenarioResult {
        let changes_hash = changes_content_hash(&scenario.modified_changes);
        if let Some(hit) = self.result_cache.get(&scenario.id, changes_hash).await {
            return hit;
        }

        let result = calculate_scenario_impact(snapshot, scenario);
        self.result_cache
            .set(scenario.id.clone(), changes_hash, result.clone())
            .await;
        result
    }

    /// Rank scenarios by projected net worth impact, best first.
    ///
    /// Missing results are filled lazily through the cache; existing
    /// ones are never recomputed. Equal impacts rank the earlier
    /// created scenario first.
    pub async fn compare_scenarios(
        &self,
        snapshot: &FinancialSnapshot,
        scenarios: &[WhatIfScenario],
    ) -> ScenarioComparison {
        let mut ranked = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = self.impact_for(snapshot, scenario).await;
            ranked.push(ScenarioStanding {
                scenario_id: scenario.id.clone(),
                name: scenario.name.clone(),
                created_at: scenario.created_at,
                result,
            });
        }

        ranked.sort_by(|a, b| {
            b.result
                .net_worth_impact
                .total_cmp(&a.result.net_worth_impact)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });

        let best_scenario = ranked.first().map(|s| s.scenario_id.clone());
        let worst_scenario = ranked.last().map(|s| s.scenario_id.clone());

        let mut recommendations = Vec::new();
        if let Some(best) = ranked.first() {
            if best.result.net_worth_impact > 0.0 {
                recommendations.push(format!(
                    "Consider '{}': projected net worth impact of {:.2}",
                    best.name, best.result.net_worth_impact
                ));
            } else {
                recommendations
                    .push("No compared scenario improves projected net worth.".to_string());
            }
        }
        for standing in &ranked {
            if standing.result.risk_score > 7 {
                recommendations.push(format!(
                    "'{}' carries a high risk score of {}",
                    standing.name, standing.result.risk_score
                ));
            }
        }

        debug!(
            "compared {} scenarios, best: {:?}",
            ranked.len(),
            best_scenario
        );

        ScenarioComparison {
            ranked,
            best_scenario,
            worst_scenario,
            recommendations,
        }
    }

    /// Long-range monthly extension of a scenario's timeline with
    /// quarterly and yearly checkpoint markers. Purely derived.
    pub fn generate_timeline_projection(
        &self,
        scenario: &WhatIfScenario,
        years: u32,
    ) -> Vec<TimelineEvent> {
        let anchor = projection_anchor(scenario);
        let total_months = years.saturating_mul(12);
        let horizon_end = anchor
            .checked_add_months(Months::new(total_months))
            .unwrap_or(anchor);

        let mut timeline = vec![TimelineEvent {
            date: anchor,
            kind: TimelineEventKind::Milestone,
            amount: 0.0,
            description: "Scenario start".to_string(),
            category: None,
        }];

        for change in &scenario.modified_changes {
            for date in change_occurrences(change, horizon_end) {
                timeline.push(TimelineEvent {
                    date,
                    kind: change.kind.into(),
                    amount: change.amount,
                    description: change.name.clone(),
                    category: change.category.clone(),
                });
            }
        }

        for month in 1..=total_months {
            let Some(date) = anchor.checked_add_months(Months::new(month)) else {
                break;
            };
            if month % 12 == 0 {
                timeline.push(TimelineEvent {
                    date,
                    kind: TimelineEventKind::Milestone,
                    amount: 0.0,
                    description: format!("Year {} checkpoint", month / 12),
                    category: None,
                });
            } else if month % 3 == 0 {
                timeline.push(TimelineEvent {
                    date,
                    kind: TimelineEventKind::Milestone,
                    amount: 0.0,
                    description: format!("Quarter {} checkpoint", month / 3),
                    category: None,
                });
            }
        }

        timeline.sort_by_key(|e| e.date);
        timeline
    }
}

impl Default for ScenarioService {
    fn default() -> Self {
        Self::new()
    }
}
