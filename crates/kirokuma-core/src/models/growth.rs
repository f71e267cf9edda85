use serde::{Deserialize, Serialize};

use crate::constants::{MAX_GROWTH_STAGE, MIN_GROWTH_STAGE};

/// Discrete growth level, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GrowthStage {
    pub stage: u8,
}

impl GrowthStage {
    /// Clamp into the valid range.
    pub fn new(stage: u8) -> Self {
        Self {
            stage: stage.clamp(MIN_GROWTH_STAGE, MAX_GROWTH_STAGE),
        }
    }

    pub fn value(&self) -> u8 {
        self.stage
    }

    pub fn is_final(&self) -> bool {
        self.stage == MAX_GROWTH_STAGE
    }
}

impl Default for GrowthStage {
    fn default() -> Self {
        Self::new(MIN_GROWTH_STAGE)
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage {}", self.stage)
    }
}
