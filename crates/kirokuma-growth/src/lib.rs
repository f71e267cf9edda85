//! # kirokuma-growth
//!
//! Maps a cumulative record count to a discrete growth stage (1..=5).

pub mod stage;

pub use stage::GrowthStageEngine;
