//! Embedding providers.

pub mod api_provider;
pub mod hashing_fallback;

pub use api_provider::ApiProvider;
pub use hashing_fallback::HashingProvider;
