//! In-memory cache for computed scenario results.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use tokio::sync::RwLock;

use super::scenarios_model::{ScenarioChange, ScenarioResult};

struct CachedImpact {
    changes_hash: u64,
    result: ScenarioResult,
}

/// Memoizes [`ScenarioResult`]s per scenario id.
///
/// An entry is only served while the content hash of the scenario's
/// `modified_changes` still matches; editing the changes makes the old
/// entry unreachable, so a stale result can never leak out. Results are
/// stored and replaced wholesale.
pub struct ScenarioResultCache {
    entries: RwLock<HashMap<String, CachedImpact>>,
}

impl ScenarioResultCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, scenario_id: &str, changes_hash: u64) -> Option<ScenarioResult> {
        let entries = self.entries.read().await;
        entries
            .get(scenario_id)
            .filter(|cached| cached.changes_hash == changes_hash)
            .map(|cached| cached.result.clone())
    }

    pub async fn set(&self, scenario_id: String, changes_hash: u64, result: ScenarioResult) {
        let mut entries = self.entries.write().await;
        entries.insert(
            scenario_id,
            CachedImpact {
                changes_hash,
                result,
            },
        );
    }
}

impl Default for ScenarioResultCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Content hash over the canonical JSON form of a change list.
pub fn changes_content_hash(changes: &[ScenarioChange]) -> u64 {
    let canonical = serde_json::to_string(changes).unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}
