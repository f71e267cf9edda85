//! Error types. One enum per subsystem, aggregated into [`KirokumaError`].

mod config_error;
mod embedding_error;
mod epoch_error;
mod storage_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use epoch_error::EpochError;
pub use storage_error::StorageError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum KirokumaError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("epoch error: {0}")]
    EpochError(#[from] EpochError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl KirokumaError {
    /// True when the error means the epoch invariant is broken for a user.
    /// Such errors must be surfaced, never retried or papered over.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            KirokumaError::EpochError(EpochError::InvariantViolated { .. })
        )
    }

    /// True for a per-call embedding failure. Trend computation treats these
    /// as "exclude this record", not as a failed computation.
    pub fn is_embedding_unavailable(&self) -> bool {
        matches!(self, KirokumaError::EmbeddingError(_))
    }
}

/// Convenience alias used across the workspace.
pub type KirokumaResult<T> = Result<T, KirokumaError>;
