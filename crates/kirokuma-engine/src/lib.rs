//! # kirokuma-engine
//!
//! The core's public surface. Wires the stores, the embedding gateway, and
//! the trend, growth, and epoch engines behind one handle that is built once
//! at startup and passed to callers.

pub mod engine;
pub mod tracing_setup;

pub use engine::{AcceptedRecord, KirokumaEngine, Stores};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
