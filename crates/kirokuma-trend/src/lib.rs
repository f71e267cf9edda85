//! # kirokuma-trend
//!
//! Detects whether an epoch's recent meals repeat a theme.
//!
//! ```text
//! records ─► resolve embeddings (stored, else gateway; bounded pool)
//!         ─► threshold graph + union-find ─► dominant cluster
//!         ─► classifier (pairwise ratio | cluster ratio) ─► TrendAnalysis
//! ```

pub mod classifier;
pub mod clustering;
pub mod engine;
pub mod frequency;
pub mod similarity;

pub use classifier::TrendClassifier;
pub use clustering::{cluster_labels, ClusterSummary};
pub use engine::TrendEngine;
pub use similarity::cosine_similarity;
