use kirokuma_core::config::*;
use kirokuma_core::models::TrendStrategy;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = KirokumaConfig::from_toml("").unwrap();

    // Storage defaults
    assert_eq!(config.storage.db_path, "kirokuma.db");
    assert_eq!(config.storage.read_pool_size, 4);
    assert_eq!(config.storage.busy_timeout_ms, 5_000);

    // Embedding defaults
    assert_eq!(config.embedding.provider, "api");
    assert_eq!(config.embedding.dimensions, 768);
    assert_eq!(config.embedding.max_retries, 3);
    assert!(!config.embedding.hashing_fallback);

    // Trend defaults
    assert_eq!(config.trend.strategy, TrendStrategy::Cluster);
    assert_eq!(config.trend.cluster_threshold, 0.75);
    assert_eq!(config.trend.pair_threshold, 0.8);
    assert_eq!(config.trend.window_limit, 30);
    assert_eq!(config.trend.window_days, 7);
    assert_eq!(config.trend.window_cutoff_days(), Some(7));
    assert_eq!(config.trend.embed_concurrency, 8);

    // Growth defaults
    assert_eq!(config.growth.breakpoints, vec![6, 15, 27, 39]);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[trend]
strategy = "pairwise"
pair_threshold = 0.85

[growth]
breakpoints = [3, 10, 20, 30]
"#;
    let config = KirokumaConfig::from_toml(toml).unwrap();
    assert_eq!(config.trend.strategy, TrendStrategy::Pairwise);
    assert_eq!(config.trend.pair_threshold, 0.85);
    // Non-overridden fields keep defaults
    assert_eq!(config.trend.cluster_threshold, 0.75);
    assert_eq!(config.growth.breakpoints, vec![3, 10, 20, 30]);
    assert_eq!(config.storage.db_path, "kirokuma.db");
}

#[test]
fn config_serde_roundtrip() {
    let config = KirokumaConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = KirokumaConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.storage.db_path, config.storage.db_path);
    assert_eq!(roundtripped.growth.breakpoints, config.growth.breakpoints);
    assert_eq!(roundtripped.trend.strategy, config.trend.strategy);
}

#[test]
fn config_rejects_out_of_range_threshold() {
    let err = KirokumaConfig::from_toml("[trend]\ncluster_threshold = 1.5\n").unwrap_err();
    assert!(err.to_string().contains("trend.cluster_threshold"));
}

#[test]
fn config_rejects_oversized_window() {
    let err = KirokumaConfig::from_toml("[trend]\nwindow_limit = 31\n").unwrap_err();
    assert!(err.to_string().contains("trend.window_limit"));
}

#[test]
fn config_rejects_non_increasing_breakpoints() {
    let err = KirokumaConfig::from_toml("[growth]\nbreakpoints = [6, 6, 27, 39]\n").unwrap_err();
    assert!(err.to_string().contains("growth.breakpoints"));
}

#[test]
fn config_rejects_unknown_provider() {
    let err = KirokumaConfig::from_toml("[embedding]\nprovider = \"onnx\"\n").unwrap_err();
    assert!(err.to_string().contains("embedding.provider"));
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kirokuma.toml");
    std::fs::write(&path, "[storage]\ndb_path = \"/var/lib/kirokuma.db\"\n").unwrap();
    let config = KirokumaConfig::load(&path).unwrap();
    assert_eq!(config.storage.db_path, "/var/lib/kirokuma.db");
}

#[test]
fn config_missing_file_is_reported() {
    let err = KirokumaConfig::load(std::path::Path::new("/nonexistent/kirokuma.toml")).unwrap_err();
    assert!(matches!(err, kirokuma_core::errors::ConfigError::FileNotFound { .. }));
}

#[test]
fn zero_window_days_disables_the_cutoff() {
    let config = KirokumaConfig::from_toml("[trend]\nwindow_days = 0\n").unwrap();
    assert_eq!(config.trend.window_days, 0);
    assert_eq!(config.trend.window_cutoff_days(), None);

    let config = KirokumaConfig::from_toml("[trend]\nwindow_days = 14\n").unwrap();
    assert_eq!(config.trend.window_cutoff_days(), Some(14));
}

#[test]
fn config_rejects_unbounded_window_days() {
    let err = KirokumaConfig::from_toml("[trend]\nwindow_days = 4000000000\n").unwrap_err();
    assert!(err.to_string().contains("trend.window_days"));
}

#[test]
fn config_bounds_embedding_retries_and_timeout() {
    let err = KirokumaConfig::from_toml("[embedding]\nmax_retries = 65\n").unwrap_err();
    assert!(err.to_string().contains("embedding.max_retries"));

    let err = KirokumaConfig::from_toml("[embedding]\ntimeout_secs = 0\n").unwrap_err();
    assert!(err.to_string().contains("embedding.timeout_secs"));

    let err = KirokumaConfig::from_toml("[embedding]\ntimeout_secs = 86400\n").unwrap_err();
    assert!(err.to_string().contains("embedding.timeout_secs"));

    let config = KirokumaConfig::from_toml("[embedding]\nmax_retries = 8\ntimeout_secs = 300\n");
    assert!(config.is_ok());
}

#[test]
fn config_bounds_embed_concurrency() {
    let err = KirokumaConfig::from_toml("[trend]\nembed_concurrency = 0\n").unwrap_err();
    assert!(err.to_string().contains("trend.embed_concurrency"));
    let err = KirokumaConfig::from_toml("[trend]\nembed_concurrency = 10000\n").unwrap_err();
    assert!(err.to_string().contains("trend.embed_concurrency"));
}
