use serde::{Deserialize, Serialize};

/// Three-level strength of a repeating theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    #[default]
    Weak,
    Medium,
    Strong,
}

impl TrendStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How raw similarity statistics become a [`TrendStrength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrategy {
    /// Fraction of all pairs at or above the pair threshold.
    Pairwise,
    /// Share of records in the largest similarity cluster.
    #[default]
    Cluster,
}

/// One recurring tag or ingredient and its share of all mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub name: String,
    /// Rounded percentage of all mentions in the window.
    pub percent: u32,
}

/// Recurring tags and ingredients across the window, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTrend {
    pub tags: Vec<FrequencyEntry>,
    pub ingredients: Vec<FrequencyEntry>,
}

/// Derived trend over one epoch's recent records. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Labels of the largest cluster, in input order.
    pub dominant_labels: Vec<String>,
    pub strength: TrendStrength,
    pub cluster_count: usize,
    /// `|dominant| / |usable records|`, 0.0 when nothing was usable.
    pub dominant_ratio: f64,
    /// Strategy that produced `strength`.
    pub strategy: TrendStrategy,
    /// Records that had a usable embedding.
    pub sample_size: usize,
    /// Records dropped because no embedding could be produced.
    pub excluded: usize,
    /// Mean embedding of the dominant cluster. Empty when there is none.
    pub centroid: Vec<f32>,
    pub frequency: FrequencyTrend,
}

impl TrendAnalysis {
    /// Fewer than two usable records: no repetition can be shown.
    pub fn is_insufficient(&self) -> bool {
        self.sample_size < 2
    }
}

/// Both strategy outcomes side by side. No merge policy is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSignals {
    pub pairwise: TrendStrength,
    /// Fraction of pairs at or above the pair threshold.
    pub pair_ratio: f64,
    pub cluster: TrendStrength,
    pub dominant_ratio: f64,
    pub sample_size: usize,
}

impl TrendSignals {
    /// The signal for one strategy.
    pub fn strength(&self, strategy: TrendStrategy) -> TrendStrength {
        match strategy {
            TrendStrategy::Pairwise => self.pairwise,
            TrendStrategy::Cluster => self.cluster,
        }
    }

    pub fn agree(&self) -> bool {
        self.pairwise == self.cluster
    }
}
