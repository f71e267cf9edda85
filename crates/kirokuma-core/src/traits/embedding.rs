use crate::errors::KirokumaResult;

/// Turns a text label into a vector. May fail per call.
///
/// Retries, if any, happen inside the implementation; callers never retry.
pub trait IEmbeddingGateway: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> KirokumaResult<Vec<f32>>;

    /// Embed a tag list as one comma-joined text.
    fn embed_tags(&self, tags: &[String]) -> KirokumaResult<Vec<f32>> {
        self.embed(&tags.join(", "))
    }

    /// The dimensionality of embeddings produced by this gateway.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this gateway is currently worth calling.
    fn is_available(&self) -> bool;
}
