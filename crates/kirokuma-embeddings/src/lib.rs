//! # kirokuma-embeddings
//!
//! [`IEmbeddingGateway`] implementations. Retries live here, inside each
//! provider; the trend core never retries.
//!
//! [`IEmbeddingGateway`]: kirokuma_core::traits::IEmbeddingGateway

pub mod degradation;
pub mod providers;

use std::sync::Arc;

use kirokuma_core::config::EmbeddingConfig;
use kirokuma_core::errors::{ConfigError, KirokumaResult};
use kirokuma_core::traits::IEmbeddingGateway;
use tracing::info;

pub use degradation::DegradationChain;
pub use providers::{ApiProvider, HashingProvider};

/// Build the gateway described by `config`.
///
/// `provider = "api"` yields the API provider, followed by the hashing
/// provider when `hashing_fallback` is set. `provider = "hashing"` yields the
/// hashing provider alone.
pub fn build_gateway(config: &EmbeddingConfig) -> KirokumaResult<Arc<dyn IEmbeddingGateway>> {
    let mut chain = DegradationChain::new();
    match config.provider.as_str() {
        "api" => {
            chain.push(Box::new(ApiProvider::from_config(config)?));
            if config.hashing_fallback {
                chain.push(Box::new(HashingProvider::new(config.dimensions)));
            }
        }
        "hashing" => chain.push(Box::new(HashingProvider::new(config.dimensions))),
        other => {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.provider".to_string(),
                message: format!("unknown provider '{other}'"),
            }
            .into())
        }
    }
    info!(
        providers = chain.len(),
        active = chain.active_provider_name(),
        dimensions = config.dimensions,
        "embedding gateway ready"
    );
    Ok(Arc::new(chain))
}
