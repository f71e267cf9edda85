//! Round-robin pool of read-only connections (never blocked by the writer under WAL).

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use kirokuma_core::errors::KirokumaResult;

use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

const MAX_POOL_SIZE: usize = 8;

pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path, pool_size: usize, busy_timeout_ms: u32) -> KirokumaResult<Self> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            apply_read_pragmas(&conn, busy_timeout_ms)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// A pool with no connections; `with_conn` always fails.
    pub fn empty() -> Self {
        Self {
            connections: Vec::new(),
            next: AtomicUsize::new(0),
        }
    }

    /// Run `f` on the next connection (round-robin).
    pub fn with_conn<F, T>(&self, f: F) -> KirokumaResult<T>
    where
        F: FnOnce(&Connection) -> KirokumaResult<T>,
    {
        if self.connections.is_empty() {
            return Err(to_storage_err("read pool has no connections".to_string()));
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|e| to_storage_err(format!("read pool lock poisoned: {e}")))?;
        f(&guard)
    }
}
