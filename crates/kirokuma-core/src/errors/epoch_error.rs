/// Epoch lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum EpochError {
    /// More than one epoch without `ended_at` exists for a user.
    #[error("epoch invariant violated for user {user_id}: {active_count} active epochs")]
    InvariantViolated { user_id: String, active_count: usize },

    #[error("epoch not found: {epoch_id}")]
    NotFound { epoch_id: String },

    #[error("epoch {epoch_id} has ended and accepts no new records")]
    Ended { epoch_id: String },

    #[error("epoch {epoch_id} does not belong to user {user_id}")]
    Foreign { epoch_id: String, user_id: String },
}
