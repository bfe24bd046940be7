//! Projection and allocation core for the PocketPlan personal finance
//! tracker.
//!
//! Two cooperating engines over an in-memory financial snapshot: the
//! scenario engine builds hypothetical timelines and ranks what-if
//! scenarios, and the allocation engine distributes incoming funds
//! across savings pots by prioritized rules. Persistence, routing and
//! rendering live in the host application; this crate reaches the
//! outside world only through the repository traits.

pub mod allocation;
pub mod errors;
pub mod scenarios;
pub mod snapshot;

pub use allocation::{AllocationService, AllocationSummary, Pot, PotFundingStatus};
pub use errors::{Error, Result, ValidationError};
pub use scenarios::{ScenarioResult, ScenarioService, WhatIfScenario};
pub use snapshot::{FinancialSnapshot, SnapshotService};
