use serde::{Deserialize, Serialize};

use super::defaults;

/// Growth stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Record counts at which stages 2, 3, 4 and 5 begin.
    pub breakpoints: Vec<u64>,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            breakpoints: defaults::DEFAULT_GROWTH_BREAKPOINTS.to_vec(),
        }
    }
}
