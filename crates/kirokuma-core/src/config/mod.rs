//! Layered configuration: compiled defaults, then an optional TOML file.
//! Every section is `#[serde(default)]`, so partial files are valid.

pub mod defaults;
mod embedding_config;
mod growth_config;
mod observability_config;
mod storage_config;
mod trend_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use growth_config::GrowthConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use trend_config::TrendConfig;

use crate::constants::{
    GROWTH_BREAKPOINT_COUNT, MAX_EMBEDDING_RETRIES, MAX_EMBEDDING_TIMEOUT_SECS,
    MAX_EMBED_CONCURRENCY, MAX_TREND_WINDOW, MAX_WINDOW_DAYS,
};
use crate::errors::ConfigError;

/// Root configuration for the whole core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KirokumaConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub trend: TrendConfig,
    pub growth: GrowthConfig,
    pub observability: ObservabilityConfig,
}

impl KirokumaConfig {
    /// Load configuration from a TOML string, then validate it.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file on disk, then validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("trend.cluster_threshold", self.trend.cluster_threshold)?;
        check_unit_interval("trend.pair_threshold", self.trend.pair_threshold)?;

        if self.trend.window_limit == 0 || self.trend.window_limit > MAX_TREND_WINDOW {
            return Err(ConfigError::ValidationFailed {
                field: "trend.window_limit".to_string(),
                message: format!("must be between 1 and {MAX_TREND_WINDOW}"),
            });
        }
        if self.trend.window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::ValidationFailed {
                field: "trend.window_days".to_string(),
                message: format!("must be at most {MAX_WINDOW_DAYS} (0 disables the cutoff)"),
            });
        }
        if self.trend.embed_concurrency == 0 || self.trend.embed_concurrency > MAX_EMBED_CONCURRENCY
        {
            return Err(ConfigError::ValidationFailed {
                field: "trend.embed_concurrency".to_string(),
                message: format!("must be between 1 and {MAX_EMBED_CONCURRENCY}"),
            });
        }

        validate_breakpoints(&self.growth.breakpoints)?;

        if self.embedding.dimensions == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.dimensions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.embedding.max_retries > MAX_EMBEDDING_RETRIES {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.max_retries".to_string(),
                message: format!("must be at most {MAX_EMBEDDING_RETRIES}"),
            });
        }
        if self.embedding.timeout_secs == 0 || self.embedding.timeout_secs > MAX_EMBEDDING_TIMEOUT_SECS
        {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.timeout_secs".to_string(),
                message: format!("must be between 1 and {MAX_EMBEDDING_TIMEOUT_SECS}"),
            });
        }
        if !matches!(self.embedding.provider.as_str(), "api" | "hashing") {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.provider".to_string(),
                message: format!("unknown provider '{}'", self.embedding.provider),
            });
        }
        if self.storage.read_pool_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// A breakpoint table must hold exactly one entry per stage transition,
/// strictly increasing, starting above zero.
pub fn validate_breakpoints(breakpoints: &[u64]) -> Result<(), ConfigError> {
    if breakpoints.len() != GROWTH_BREAKPOINT_COUNT {
        return Err(ConfigError::ValidationFailed {
            field: "growth.breakpoints".to_string(),
            message: format!(
                "expected {GROWTH_BREAKPOINT_COUNT} breakpoints, got {}",
                breakpoints.len()
            ),
        });
    }
    if breakpoints[0] == 0 {
        return Err(ConfigError::ValidationFailed {
            field: "growth.breakpoints".to_string(),
            message: "first breakpoint must be greater than 0".to_string(),
        });
    }
    if breakpoints.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::ValidationFailed {
            field: "growth.breakpoints".to_string(),
            message: "breakpoints must be strictly increasing".to_string(),
        });
    }
    Ok(())
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(())
}
