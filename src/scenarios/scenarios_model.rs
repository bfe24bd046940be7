use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What part of the finances a hypothetical change touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Income,
    Expense,
    Debt,
    Investment,
    Goal,
}

/// How often a change recurs within its active range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeFrequency {
    OneTime,
    Monthly,
    Quarterly,
    Yearly,
}

/// One hypothetical modification to the baseline finances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioChange {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ChangeKind,
    pub start_date: NaiveDate,
    /// Missing end date means the change stays active for the whole
    /// projection window.
    pub end_date: Option<NaiveDate>,
    /// Signed magnitude contributed once per occurrence.
    pub amount: f64,
    pub frequency: ChangeFrequency,
    pub category: Option<String>,
}

/// A hypothetical alternate timeline compared against the baseline.
///
/// Results are not stored on the scenario; they live in the external
/// [`ScenarioResultCache`], keyed by id and a content hash of
/// `modified_changes`, and are replaced wholesale on every change.
///
/// [`ScenarioResultCache`]: crate::scenarios::ScenarioResultCache
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfScenario {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Immutable once created; also anchors the projection when no
    /// change carries a start date.
    pub created_at: DateTime<Utc>,
    pub base_changes: Vec<ScenarioChange>,
    pub modified_changes: Vec<ScenarioChange>,
}

/// The four headline metrics computed for baseline and modified
/// projections alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub monthly_cash_flow: f64,
    /// Percent of income kept, 0 when there is no income.
    pub savings_rate: f64,
    /// Percent of monthly income owed, 0 when there is no income.
    pub debt_to_income: f64,
    /// Months of expenses covered by net assets, 0 when there are no
    /// monthly expenses.
    pub emergency_fund_months: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimelineEventKind {
    Income,
    Expense,
    Debt,
    Investment,
    Goal,
    Milestone,
}

impl From<ChangeKind> for TimelineEventKind {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Income => TimelineEventKind::Income,
            ChangeKind::Expense => TimelineEventKind::Expense,
            ChangeKind::Debt => TimelineEventKind::Debt,
            ChangeKind::Investment => TimelineEventKind::Investment,
            ChangeKind::Goal => TimelineEventKind::Goal,
        }
    }
}

/// One dated entry on a scenario's projected timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub kind: TimelineEventKind,
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
}

/// Derived impact of a scenario against its baseline. Never mutated in
/// place; recomputation always replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub net_worth_impact: f64,
    /// Goal id -> months earlier (negative) or later (positive) to
    /// completion.
    pub goal_timeline_changes: HashMap<String, i32>,
    /// Months earlier (negative) or later (positive) until debt free.
    pub debt_free_date_change: i32,
    /// 1..=10.
    pub risk_score: u8,
    /// 0..=100 percent.
    pub probability: u8,
    pub key_metrics: KeyMetrics,
    /// Ascending by date.
    pub timeline: Vec<TimelineEvent>,
}

/// One scenario's position in a comparison, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioStanding {
    pub scenario_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub result: ScenarioResult,
}

/// Ranked outcome of comparing several scenarios over one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    /// Descending by net worth impact; equal impacts rank the earlier
    /// created scenario first.
    pub ranked: Vec<ScenarioStanding>,
    pub best_scenario: Option<String>,
    pub worst_scenario: Option<String>,
    pub recommendations: Vec<String>,
}
