use serde::{Deserialize, Serialize};

use crate::ledger::DEFAULT_RECENT_LIMIT;
use crate::threshold::DEFAULT_LOW_STOCK_THRESHOLD;

/// Tunables for ledger-derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    /// Threshold for products without a positive threshold of their own.
    pub default_threshold: i64,
    /// Row count of the dashboard's "recent" listings.
    pub recent_limit: usize,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}
