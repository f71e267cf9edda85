//! # kirokuma-epoch
//!
//! Per-user timeline state machine over an [`IEpochStore`].
//!
//! [`IEpochStore`]: kirokuma_core::traits::IEpochStore

pub mod lifecycle;

pub use lifecycle::{EpochLifecycleManager, EpochState};
