/// Embedding gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding unavailable from {provider}: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}
