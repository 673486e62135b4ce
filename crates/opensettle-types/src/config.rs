//! Configuration for the OpenSettle engine.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Engine configuration.
///
/// The cooldown can also be changed at runtime by the owner via
/// `set_cooldown_secs`; this struct only sets the starting values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum interval between consecutive privileged actions per actor
    /// per action kind, in seconds.
    pub cooldown_secs: u64,
    /// Maximum number of orders admitted into a single batch.
    pub max_orders_per_batch: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: constants::DEFAULT_COOLDOWN_SECS,
            max_orders_per_batch: constants::MAX_ORDERS_PER_BATCH,
        }
    }
}
