//! Fallback chain over embedding providers.
//!
//! Providers are tried in order; unavailable ones are skipped. Each fallback
//! past the first provider is logged and counted.

use std::sync::atomic::{AtomicUsize, Ordering};

use kirokuma_core::errors::{EmbeddingError, KirokumaResult};
use kirokuma_core::traits::IEmbeddingGateway;
use tracing::warn;

pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingGateway>>,
    fallbacks: AtomicUsize,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            fallbacks: AtomicUsize::new(0),
        }
    }

    /// Append a provider at the lowest priority.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingGateway>) {
        self.chain.push(provider);
    }

    /// Name of the first available provider, or "none".
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// How many calls were served by something other than the first provider.
    pub fn fallback_count(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl IEmbeddingGateway for DegradationChain {
    fn embed(&self, text: &str) -> KirokumaResult<Vec<f32>> {
        let mut last_error = None;
        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text) {
                Ok(v) => {
                    if i > 0 {
                        self.fallbacks.fetch_add(1, Ordering::Relaxed);
                        warn!(
                            fallback = provider.name(),
                            primary = self.chain[0].name(),
                            "embedding served by fallback provider"
                        );
                    }
                    return Ok(v);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::Unavailable {
                provider: "chain".to_string(),
                reason: format!("none of {} providers available", self.chain.len()),
            }
            .into()
        }))
    }

    /// Dimensions of the first provider; every provider must agree.
    fn dimensions(&self) -> usize {
        self.chain.first().map(|p| p.dimensions()).unwrap_or(0)
    }

    fn name(&self) -> &str {
        self.active_provider_name()
    }

    fn is_available(&self) -> bool {
        self.chain.iter().any(|p| p.is_available())
    }
}
