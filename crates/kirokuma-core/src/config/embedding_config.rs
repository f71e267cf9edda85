use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Primary provider: "api" or "hashing".
    pub provider: String,
    /// HTTP endpoint for the API provider.
    pub endpoint: String,
    /// Model name sent to the API provider.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Embedding dimensions. API responses are resized to this length.
    pub dimensions: usize,
    /// Retries inside the API provider before it reports unavailable.
    pub max_retries: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Append the offline hashing provider to the degradation chain.
    pub hashing_fallback: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_EMBEDDING_API_KEY_ENV.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            hashing_fallback: defaults::DEFAULT_HASHING_FALLBACK,
        }
    }
}
