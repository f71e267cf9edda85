use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file. `:memory:` opens an in-memory store.
    pub db_path: String,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl StorageConfig {
    pub fn is_in_memory(&self) -> bool {
        self.db_path == ":memory:"
    }
}
