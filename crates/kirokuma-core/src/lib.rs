//! # kirokuma-core
//!
//! Foundation crate for the Kirokuma meal-trend core.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::KirokumaConfig;
pub use errors::{KirokumaError, KirokumaResult};
pub use models::{
    Artifact, Epoch, GrowthStage, MealRecord, NewMealRecord, RecordWindow, TrendAnalysis,
    TrendStrength,
};
