//! Trend strength classification.
//!
//! Two strategies over the same similarity substrate:
//! - pairwise: share of all `C(n,2)` pairs at or above the pair threshold
//!   (≥0.6 strong, ≥0.3 medium)
//! - cluster: share of records in the dominant cluster
//!   (≥0.6 strong, ≥0.4 medium)
//!
//! Fewer than two usable records is always weak, under both strategies.

use kirokuma_core::config::TrendConfig;
use kirokuma_core::models::{TrendSignals, TrendStrategy, TrendStrength};

use crate::clustering::{cluster_labels, ClusterSummary};
use crate::similarity::cosine_similarity;

pub const STRONG_PAIR_RATIO: f64 = 0.6;
pub const MEDIUM_PAIR_RATIO: f64 = 0.3;
pub const STRONG_CLUSTER_RATIO: f64 = 0.6;
pub const MEDIUM_CLUSTER_RATIO: f64 = 0.4;

/// Fraction of unordered pairs with similarity `>= threshold`.
/// 0.0 when there are fewer than two vectors.
pub fn pair_ratio(vectors: &[&[f32]], threshold: f64) -> f64 {
    let n = vectors.len();
    if n < 2 {
        return 0.0;
    }
    let mut similar = 0usize;
    let mut total = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if cosine_similarity(vectors[i], vectors[j]) >= threshold {
                similar += 1;
            }
            total += 1;
        }
    }
    similar as f64 / total as f64
}

/// Strength from a pairwise ratio over `n` usable records.
pub fn classify_pair_ratio(n: usize, ratio: f64) -> TrendStrength {
    if n < 2 {
        return TrendStrength::Weak;
    }
    if ratio >= STRONG_PAIR_RATIO {
        TrendStrength::Strong
    } else if ratio >= MEDIUM_PAIR_RATIO {
        TrendStrength::Medium
    } else {
        TrendStrength::Weak
    }
}

/// Strength from a dominant-cluster ratio over `n` usable records.
///
/// A single record clusters with itself at ratio 1.0 but shows no repetition,
/// so `n < 2` is weak regardless of the ratio.
pub fn classify_cluster_ratio(n: usize, dominant_ratio: f64) -> TrendStrength {
    if n < 2 {
        return TrendStrength::Weak;
    }
    if dominant_ratio >= STRONG_CLUSTER_RATIO {
        TrendStrength::Strong
    } else if dominant_ratio >= MEDIUM_CLUSTER_RATIO {
        TrendStrength::Medium
    } else {
        TrendStrength::Weak
    }
}

/// Classifier holding the configured thresholds and strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendClassifier {
    pub strategy: TrendStrategy,
    pub cluster_threshold: f64,
    pub pair_threshold: f64,
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self::from_config(&TrendConfig::default())
    }
}

impl TrendClassifier {
    pub fn from_config(config: &TrendConfig) -> Self {
        Self {
            strategy: config.strategy,
            cluster_threshold: config.cluster_threshold,
            pair_threshold: config.pair_threshold,
        }
    }

    pub fn with_strategy(mut self, strategy: TrendStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cluster the items with the cluster threshold.
    pub fn cluster(&self, items: &[(String, Vec<f32>)]) -> ClusterSummary {
        cluster_labels(items, self.cluster_threshold)
    }

    /// Strength under the configured strategy.
    pub fn classify(&self, items: &[(String, Vec<f32>)], summary: &ClusterSummary) -> TrendStrength {
        match self.strategy {
            TrendStrategy::Pairwise => {
                let vectors: Vec<&[f32]> = items.iter().map(|(_, v)| v.as_slice()).collect();
                classify_pair_ratio(items.len(), pair_ratio(&vectors, self.pair_threshold))
            }
            TrendStrategy::Cluster => classify_cluster_ratio(items.len(), summary.dominant_ratio),
        }
    }

    /// Both strategies, independently. Disagreement is left to the caller.
    pub fn signals(&self, items: &[(String, Vec<f32>)], summary: &ClusterSummary) -> TrendSignals {
        let n = items.len();
        let vectors: Vec<&[f32]> = items.iter().map(|(_, v)| v.as_slice()).collect();
        let ratio = pair_ratio(&vectors, self.pair_threshold);
        TrendSignals {
            pairwise: classify_pair_ratio(n, ratio),
            pair_ratio: ratio,
            cluster: classify_cluster_ratio(n, summary.dominant_ratio),
            dominant_ratio: summary.dominant_ratio,
            sample_size: n,
        }
    }
}
