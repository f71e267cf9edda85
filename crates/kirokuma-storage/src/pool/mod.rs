//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use kirokuma_core::config::StorageConfig;
use kirokuma_core::errors::KirokumaResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a pool for the database file at `path`.
    pub fn open(path: &Path, config: &StorageConfig) -> KirokumaResult<Self> {
        let writer = WriteConnection::open(path, config.busy_timeout_ms)?;
        let readers = ReadPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// In-memory writer with no usable readers: each in-memory connection is
    /// its own database, so reads must go through the writer.
    pub fn open_in_memory() -> KirokumaResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: ReadPool::empty(),
            db_path: None,
        })
    }
}
