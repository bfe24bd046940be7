pub mod result_cache;
pub mod scenarios_model;
pub mod scenarios_service;

pub use result_cache::{changes_content_hash, ScenarioResultCache};
pub use scenarios_model::{
    ChangeFrequency, ChangeKind, KeyMetrics, ScenarioChange, ScenarioComparison, ScenarioResult,
    ScenarioStanding, TimelineEvent, TimelineEventKind, WhatIfScenario,
};
pub use scenarios_service::{calculate_scenario_impact, ScenarioService};
