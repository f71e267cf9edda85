use crate::errors::KirokumaResult;
use crate::models::{Artifact, Epoch, EpochCreation, EpochRotation, MealRecord, RecordWindow};

/// Epoch persistence.
///
/// `create_if_absent` and `rotate` must each be atomic per user: no
/// interleaving of two calls may leave two epochs with `ended_at` unset.
pub trait IEpochStore: Send + Sync {
    /// The user's active epoch. More than one match is an
    /// `EpochError::InvariantViolated`, never resolved by picking one.
    fn find_active(&self, user_id: &str) -> KirokumaResult<Option<Epoch>>;

    /// Create an active epoch unless one exists; return whichever is active.
    fn create_if_absent(&self, user_id: &str) -> KirokumaResult<EpochCreation>;

    /// End the active epoch (if any) and create a new one, in one unit.
    fn rotate(&self, user_id: &str) -> KirokumaResult<EpochRotation>;

    /// Set `ended_at` on an epoch. Ending an ended epoch is a no-op.
    fn end(&self, epoch_id: &str) -> KirokumaResult<()>;

    fn get(&self, epoch_id: &str) -> KirokumaResult<Option<Epoch>>;

    /// Every epoch of a user, newest first.
    fn list_by_user(&self, user_id: &str) -> KirokumaResult<Vec<Epoch>>;
}

/// Meal record persistence. Records are partitioned by (user, epoch).
pub trait IRecordStore: Send + Sync {
    /// Insert a record together with its artifact, atomically.
    fn create(&self, record: &MealRecord, artifact: &Artifact) -> KirokumaResult<()>;

    fn get(&self, record_id: &str) -> KirokumaResult<Option<MealRecord>>;

    /// Records of one epoch within `window`, newest first.
    fn list_by_epoch(
        &self,
        user_id: &str,
        epoch_id: &str,
        window: RecordWindow,
    ) -> KirokumaResult<Vec<MealRecord>>;

    /// Cumulative number of records in one epoch.
    fn count(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<u64>;
}

/// Artifact history.
pub trait IArtifactStore: Send + Sync {
    /// Most recent artifact in an epoch.
    fn latest(&self, user_id: &str, epoch_id: &str) -> KirokumaResult<Option<Artifact>>;

    /// Artifacts of one epoch, newest first, at most `limit`.
    fn list_by_epoch(
        &self,
        user_id: &str,
        epoch_id: &str,
        limit: usize,
    ) -> KirokumaResult<Vec<Artifact>>;

    fn get_by_record(&self, record_id: &str) -> KirokumaResult<Option<Artifact>>;
}
