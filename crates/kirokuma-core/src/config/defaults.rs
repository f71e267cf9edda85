// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "kirokuma.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "api";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_API_KEY_ENV: &str = "KIROKUMA_EMBEDDING_API_KEY";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 3;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HASHING_FALLBACK: bool = false;

// --- Trend ---
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.75;
pub const DEFAULT_PAIR_THRESHOLD: f64 = 0.80;
pub const DEFAULT_WINDOW_LIMIT: usize = 30;
pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_EMBED_CONCURRENCY: usize = 8;

// --- Growth ---
pub const DEFAULT_GROWTH_BREAKPOINTS: [u64; 4] = [6, 15, 27, 39];

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
