use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bounded timeline of one user's records.
///
/// At most one epoch per user has `ended_at == None`. An epoch is only ever
/// ended by an explicit reset and is never mutated otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Epoch {
    /// A fresh, active epoch for `user_id`.
    pub fn new(user_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// Outcome of an atomic create-if-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochCreation {
    /// The active epoch after the call.
    pub epoch: Epoch,
    /// False when another caller had already created the active epoch.
    pub created: bool,
}

/// Outcome of an atomic end-then-create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochRotation {
    /// The epoch that was ended, with `ended_at` set. `None` for a user with no history.
    pub ended: Option<Epoch>,
    /// The newly active epoch.
    pub started: Epoch,
}
