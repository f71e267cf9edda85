use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::TrendStrategy;

/// Trend detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Strategy whose strength is reported on `TrendAnalysis`.
    pub strategy: TrendStrategy,
    /// Similarity at or above which two records share a cluster edge.
    pub cluster_threshold: f64,
    /// Similarity at or above which a pair counts for the pairwise ratio.
    pub pair_threshold: f64,
    /// Maximum number of records in the trend window.
    pub window_limit: usize,
    /// Only records newer than this many days are considered. 0 = no cutoff.
    pub window_days: u32,
    /// Maximum concurrent gateway calls while resolving embeddings.
    pub embed_concurrency: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            strategy: TrendStrategy::default(),
            cluster_threshold: defaults::DEFAULT_CLUSTER_THRESHOLD,
            pair_threshold: defaults::DEFAULT_PAIR_THRESHOLD,
            window_limit: defaults::DEFAULT_WINDOW_LIMIT,
            window_days: defaults::DEFAULT_WINDOW_DAYS,
            embed_concurrency: defaults::DEFAULT_EMBED_CONCURRENCY,
        }
    }
}

impl TrendConfig {
    /// Age cutoff in days for the trend window, `None` when disabled.
    pub fn window_cutoff_days(&self) -> Option<u32> {
        (self.window_days > 0).then_some(self.window_days)
    }
}
