pub mod allocation_model;
pub mod allocation_service;
pub mod allocation_traits;

pub use allocation_model::{
    resolve_rule_amount, AllocationFailure, AllocationRecord, AllocationResult, AllocationRule,
    AllocationSummary, Pot, PotAllocationNeed, PotFundingStatus, RuleCadence, RuleSchedule,
};
pub use allocation_service::AllocationService;
pub use allocation_traits::AllocationRepositoryTrait;
