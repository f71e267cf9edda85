//! Step function from cumulative count to stage.
//!
//! Stage = 1 + number of breakpoints `b` with `count >= b`. With the default
//! table `[6, 15, 27, 39]`: 0..=5 → 1, 6..=14 → 2, 15..=26 → 3, 27..=38 → 4,
//! 39 and above → 5.

use kirokuma_core::config::{validate_breakpoints, GrowthConfig};
use kirokuma_core::constants::MIN_GROWTH_STAGE;
use kirokuma_core::errors::KirokumaResult;
use kirokuma_core::models::GrowthStage;

/// Growth stage computation over a validated breakpoint table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthStageEngine {
    breakpoints: Vec<u64>,
}

impl Default for GrowthStageEngine {
    fn default() -> Self {
        Self {
            breakpoints: GrowthConfig::default().breakpoints,
        }
    }
}

impl GrowthStageEngine {
    /// Build from an externally supplied table. The table must hold exactly
    /// four strictly increasing values, the first above zero.
    pub fn new(breakpoints: Vec<u64>) -> KirokumaResult<Self> {
        validate_breakpoints(&breakpoints)?;
        Ok(Self { breakpoints })
    }

    pub fn from_config(config: &GrowthConfig) -> KirokumaResult<Self> {
        Self::new(config.breakpoints.clone())
    }

    pub fn breakpoints(&self) -> &[u64] {
        &self.breakpoints
    }

    /// Stage for a cumulative count. Total over `u64`; saturates at 5.
    pub fn stage(&self, cumulative_count: u64) -> GrowthStage {
        let passed = self
            .breakpoints
            .iter()
            .take_while(|&&b| cumulative_count >= b)
            .count();
        GrowthStage::new(MIN_GROWTH_STAGE.saturating_add(passed as u8))
    }

    /// Records still needed to reach the next stage. `None` at the final stage.
    pub fn remaining_to_next(&self, cumulative_count: u64) -> Option<u64> {
        self.breakpoints
            .iter()
            .find(|&&b| cumulative_count < b)
            .map(|b| b - cumulative_count)
    }
}
