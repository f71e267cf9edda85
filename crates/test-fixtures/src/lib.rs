//! Test fixture loader for Kirokuma golden scenarios.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests across crates.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the test-fixtures crate.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // The crate itself may be the starting point.
    if path.join("golden").exists() && path.ends_with("test-fixtures") {
        return path;
    }
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Load every fixture in a subdirectory as `T`, paired with its file name.
pub fn load_all<T: DeserializeOwned>(subdir: &str) -> Vec<(String, T)> {
    list_fixtures(subdir)
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let relative = format!("{subdir}/{name}");
            (name, load_fixture(&relative))
        })
        .collect()
}

/// One labelled embedding in a trend scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendItem {
    pub label: String,
    pub vector: Vec<f32>,
}

/// Expected clustering and classification outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendExpectation {
    pub dominant_labels: Vec<String>,
    pub cluster_count: usize,
    pub dominant_ratio: f64,
    pub cluster_strength: String,
    pub pairwise_strength: String,
}

/// A golden trend scenario (`golden/trend/*.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct TrendScenario {
    pub description: String,
    pub cluster_threshold: f64,
    pub pair_threshold: f64,
    pub items: Vec<TrendItem>,
    pub expected: TrendExpectation,
}

impl TrendScenario {
    /// Items as `(label, vector)` pairs.
    pub fn pairs(&self) -> Vec<(String, Vec<f32>)> {
        self.items
            .iter()
            .map(|i| (i.label.clone(), i.vector.clone()))
            .collect()
    }
}

/// A golden growth table (`golden/growth/*.json`): `[count, stage]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct GrowthScenario {
    pub description: String,
    pub breakpoints: Vec<u64>,
    pub expected: Vec<(u64, u8)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_trend_fixtures_parse() {
        let scenarios: Vec<(String, TrendScenario)> = load_all("golden/trend");
        assert!(!scenarios.is_empty());
        for (name, scenario) in scenarios {
            assert!(!scenario.items.is_empty(), "{name} has no items");
        }
    }

    #[test]
    fn golden_growth_fixtures_parse() {
        let scenarios: Vec<(String, GrowthScenario)> = load_all("golden/growth");
        assert!(!scenarios.is_empty());
        assert!(fixture_exists("golden/growth/default_breakpoints.json"));
    }
}
