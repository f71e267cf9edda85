//! # kirokuma-storage
//!
//! SQLite backend for the epoch, record, and artifact stores.
//!
//! One serialized write connection plus a round-robin read pool. The
//! single-active-epoch invariant is enforced twice: `BEGIN IMMEDIATE`
//! transactions around every epoch mutation, and a partial unique index on
//! `epochs(user_id) WHERE ended_at IS NULL`.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use kirokuma_core::errors::{KirokumaError, StorageError};

/// Helper to convert a message into a `KirokumaError::StorageError`.
pub fn to_storage_err(msg: String) -> KirokumaError {
    StorageError::Unavailable { message: msg }.into()
}
