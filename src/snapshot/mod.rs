pub mod snapshot_model;
pub mod snapshot_service;
pub mod snapshot_traits;

pub use snapshot_model::{Debt, FinancialSnapshot, Goal, TransactionRecord};
pub use snapshot_service::SnapshotService;
pub use snapshot_traits::{SnapshotRepositoryTrait, StoredDebt, StoredGoal, StoredTransaction};
