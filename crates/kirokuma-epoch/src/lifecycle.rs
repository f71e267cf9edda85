//! EpochLifecycleManager.
//!
//! ```text
//! NoActiveEpoch ──ensure_active──► ActiveEpoch(new)
//! ActiveEpoch(id) ─ensure_active─► ActiveEpoch(id)
//! NoActiveEpoch ──reset──────────► ActiveEpoch(new)
//! ActiveEpoch(id) ─reset─────────► end(id), ActiveEpoch(new)
//! ```
//!
//! Calls for the same user are serialized in-process by a per-user lock.
//! Across processes the store's atomic `create_if_absent` / `rotate` carry
//! the invariant; a caller that loses the race adopts the winner's epoch.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use kirokuma_core::errors::{EpochError, KirokumaResult};
use kirokuma_core::models::Epoch;
use kirokuma_core::traits::IEpochStore;
use tracing::{debug, info};

/// Observable lifecycle state of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpochState {
    NoActiveEpoch,
    ActiveEpoch(String),
}

pub struct EpochLifecycleManager {
    store: Arc<dyn IEpochStore>,
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl EpochLifecycleManager {
    pub fn new(store: Arc<dyn IEpochStore>) -> Self {
        Self {
            store,
            user_locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn IEpochStore> {
        &self.store
    }

    /// Current state for `user_id`. More than one active epoch surfaces as
    /// `EpochError::InvariantViolated`.
    pub fn state(&self, user_id: &str) -> KirokumaResult<EpochState> {
        Ok(match self.store.find_active(user_id)? {
            Some(epoch) => EpochState::ActiveEpoch(epoch.id),
            None => EpochState::NoActiveEpoch,
        })
    }

    /// The active epoch, created on first contact. Idempotent.
    pub fn ensure_active(&self, user_id: &str) -> KirokumaResult<Epoch> {
        self.serialized(user_id, || self.ensure_active_locked(user_id))
    }

    fn ensure_active_locked(&self, user_id: &str) -> KirokumaResult<Epoch> {
        if let Some(epoch) = self.store.find_active(user_id)? {
            debug!(user_id, epoch_id = %epoch.id, "active epoch found");
            return Ok(epoch);
        }

        let creation = self.store.create_if_absent(user_id)?;
        if creation.created {
            info!(user_id, epoch_id = %creation.epoch.id, "epoch created");
        } else {
            info!(
                user_id,
                epoch_id = %creation.epoch.id,
                "epoch created concurrently elsewhere, adopting it"
            );
        }
        Ok(creation.epoch)
    }

    /// End the active epoch (if any) and start a new one, atomically.
    pub fn reset(&self, user_id: &str) -> KirokumaResult<Epoch> {
        self.serialized(user_id, || self.reset_locked(user_id))
    }

    fn reset_locked(&self, user_id: &str) -> KirokumaResult<Epoch> {
        let rotation = self.store.rotate(user_id)?;
        if let Some(ended) = &rotation.ended {
            info!(user_id, epoch_id = %ended.id, "epoch ended");
        }
        info!(user_id, epoch_id = %rotation.started.id, "epoch created by reset");
        Ok(rotation.started)
    }

    /// Look up an epoch and check that it belongs to `user_id`.
    pub fn owned_epoch(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<Epoch> {
        let epoch = self
            .store
            .get(epoch_id)?
            .ok_or_else(|| EpochError::NotFound {
                epoch_id: epoch_id.to_string(),
            })?;
        if epoch.user_id != user_id {
            return Err(EpochError::Foreign {
                epoch_id: epoch_id.to_string(),
                user_id: user_id.to_string(),
            }
            .into());
        }
        Ok(epoch)
    }

    /// Every epoch of `user_id`, newest first.
    pub fn history(&self, user_id: &str) -> KirokumaResult<Vec<Epoch>> {
        self.store.list_by_user(user_id)
    }

    /// Users with a lock entry right now. Entries are dropped once no call
    /// for that user is in flight.
    pub fn tracked_users(&self) -> usize {
        self.user_locks.len()
    }

    /// Run `f` under the per-user lock, then drop the lock entry if no other
    /// caller holds or waits on it.
    fn serialized<T>(&self, user_id: &str, f: impl FnOnce() -> T) -> T {
        let lock = self
            .user_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let out = {
            let _guard = acquire(&lock);
            f()
        };
        // Clones are only taken under the shard lock `remove_if` holds, so a
        // count of 2 (map + `lock`) means nobody else can be waiting.
        self.user_locks
            .remove_if(user_id, |_, held| Arc::strong_count(held) == 2);
        out
    }
}

/// The lock guards no data, so a poisoned lock is still usable.
fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
