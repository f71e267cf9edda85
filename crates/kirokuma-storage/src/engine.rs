//! StorageEngine: owns the ConnectionPool and implements the epoch, record,
//! and artifact stores.

use std::path::Path;

use rusqlite::Connection;

use kirokuma_core::config::StorageConfig;
use kirokuma_core::errors::KirokumaResult;
use kirokuma_core::models::{Artifact, Epoch, EpochCreation, EpochRotation, MealRecord, RecordWindow};
use kirokuma_core::traits::{IArtifactStore, IEpochStore, IRecordStore};
use tracing::warn;

use crate::migrations;
use crate::pool::{pragmas, ConnectionPool};
use crate::queries::{artifact_ops, epoch_ops, record_ops};

pub struct StorageEngine {
    pool: ConnectionPool,
    /// File-backed stores read through the pool. In-memory stores read
    /// through the writer, since each in-memory connection is its own database.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a file-backed store with default settings.
    pub fn open(path: &Path) -> KirokumaResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> KirokumaResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory store (for tests and ephemeral use).
    pub fn open_in_memory() -> KirokumaResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open whatever `config.db_path` names; `:memory:` is in-memory.
    pub fn from_config(config: &StorageConfig) -> KirokumaResult<Self> {
        if config.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open_with_config(Path::new(&config.db_path), config)
        }
    }

    /// Migrations run on the writer before any reader sees the schema.
    fn initialize(&self) -> KirokumaResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            if self.use_read_pool && !pragmas::verify_wal_mode(conn)? {
                warn!(
                    db_path = ?self.pool.db_path,
                    "WAL mode not active; readers will block on the writer"
                );
            }
            migrations::run_migrations(conn)
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> KirokumaResult<T>
    where
        F: FnOnce(&Connection) -> KirokumaResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IEpochStore for StorageEngine {
    /// Reads through the writer: the answer feeds create/rotate decisions
    /// and must not lag behind the last commit.
    fn find_active(&self, user_id: &str) -> KirokumaResult<Option<Epoch>> {
        self.pool
            .writer
            .with_conn_sync(|conn| epoch_ops::find_active(conn, user_id))
    }

    fn create_if_absent(&self, user_id: &str) -> KirokumaResult<EpochCreation> {
        self.pool
            .writer
            .with_conn_sync(|conn| epoch_ops::create_if_absent(conn, user_id))
    }

    fn rotate(&self, user_id: &str) -> KirokumaResult<EpochRotation> {
        self.pool
            .writer
            .with_conn_sync(|conn| epoch_ops::rotate(conn, user_id))
    }

    fn end(&self, epoch_id: &str) -> KirokumaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| epoch_ops::end_epoch(conn, epoch_id))
    }

    fn get(&self, epoch_id: &str) -> KirokumaResult<Option<Epoch>> {
        self.with_reader(|conn| epoch_ops::get_epoch(conn, epoch_id))
    }

    fn list_by_user(&self, user_id: &str) -> KirokumaResult<Vec<Epoch>> {
        self.with_reader(|conn| epoch_ops::list_by_user(conn, user_id))
    }
}

impl IRecordStore for StorageEngine {
    fn create(&self, record: &MealRecord, artifact: &Artifact) -> KirokumaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| record_ops::insert_with_artifact(conn, record, artifact))
    }

    fn get(&self, record_id: &str) -> KirokumaResult<Option<MealRecord>> {
        self.with_reader(|conn| record_ops::get_record(conn, record_id))
    }

    fn list_by_epoch(
        &self,
        user_id: &str,
        epoch_id: &str,
        window: RecordWindow,
    ) -> KirokumaResult<Vec<MealRecord>> {
        self.with_reader(|conn| record_ops::list_by_epoch(conn, user_id, epoch_id, window))
    }

    fn count(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<u64> {
        self.with_reader(|conn| record_ops::count(conn, user_id, epoch_id))
    }
}

impl IArtifactStore for StorageEngine {
    fn latest(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<Option<Artifact>> {
        self.with_reader(|conn| artifact_ops::latest(conn, user_id, epoch_id))
    }

    fn list_by_epoch(
        &self,
        user_id: &str,
        epoch_id: &str,
        limit: usize,
    ) -> KirokumaResult<Vec<Artifact>> {
        self.with_reader(|conn| artifact_ops::list_by_epoch(conn, user_id, epoch_id, limit))
    }

    fn get_by_record(&self, record_id: &str) -> KirokumaResult<Option<Artifact>> {
        self.with_reader(|conn| artifact_ops::get_by_record(conn, record_id))
    }
}
