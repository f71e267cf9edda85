//! HTTP embedding provider for OpenAI-compatible `/v1/embeddings` endpoints.
//!
//! Each call retries with exponential backoff (100ms, 200ms, 400ms, ...)
//! before reporting `EmbeddingError::Unavailable`.

use std::time::Duration;

use kirokuma_core::config::EmbeddingConfig;
use kirokuma_core::constants::MAX_EMBEDDING_RETRIES;
use kirokuma_core::errors::{EmbeddingError, KirokumaResult};
use kirokuma_core::traits::IEmbeddingGateway;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct ApiProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    /// `None` when the key variable is unset; the provider then reports unavailable.
    api_key: Option<String>,
    dimensions: usize,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl ApiProvider {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        dimensions: usize,
        max_retries: u32,
        timeout: Duration,
    ) -> KirokumaResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Unavailable {
                provider: "api".to_string(),
                reason: format!("http client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            dimensions,
            max_retries: max_retries.min(MAX_EMBEDDING_RETRIES),
        })
    }

    /// Reads the key from the environment variable named in `config`.
    pub fn from_config(config: &EmbeddingConfig) -> KirokumaResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!(
                env = %config.api_key_env,
                "embedding API key not set; API provider disabled"
            );
        }
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.dimensions,
            config.max_retries,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn unavailable(&self, reason: impl Into<String>) -> EmbeddingError {
        EmbeddingError::Unavailable {
            provider: self.model.clone(),
            reason: reason.into(),
        }
    }

    fn request_embedding(&self, text: &str) -> KirokumaResult<Vec<f32>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(self.unavailable("no API key configured").into());
        };

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(backoff_delay(attempt));
                debug!(attempt, "retrying embedding request");
            }
            match self.send_request(api_key, text) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    warn!(attempt, error = %e, "embedding request failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| self.unavailable("all retries exhausted"))
            .into())
    }

    fn send_request(&self, api_key: &str, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: vec![text],
            })
            .send()
            .map_err(|e| self.unavailable(format!("http error: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| self.unavailable(format!("reading body: {e}")))?;
        if !status.is_success() {
            return Err(self.unavailable(format!("API returned {status}: {body}")));
        }
        parse_response(&self.model, &body, self.dimensions)
    }
}

/// First embedding in an OpenAI-style response, resized to `dimensions`.
pub fn parse_response(
    provider: &str,
    body: &str,
    dimensions: usize,
) -> Result<Vec<f32>, EmbeddingError> {
    let resp: EmbedResponse =
        serde_json::from_str(body).map_err(|e| EmbeddingError::InvalidResponse {
            provider: provider.to_string(),
            reason: format!("json: {e}"),
        })?;
    let mut v = resp
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| EmbeddingError::InvalidResponse {
            provider: provider.to_string(),
            reason: "response carried no embedding".to_string(),
        })?;
    v.resize(dimensions, 0.0);
    Ok(v)
}

impl IEmbeddingGateway for ApiProvider {
    fn embed(&self, text: &str) -> KirokumaResult<Vec<f32>> {
        self.request_embedding(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Sleep before retry `attempt` (1-based): 100ms doubled per retry,
/// saturating at the retry cap.
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(MAX_EMBEDDING_RETRIES - 1);
    Duration::from_millis(100u64 << exponent)
}
