use kirokuma_core::errors::*;

#[test]
fn invariant_violation_carries_user_and_count() {
    let err: KirokumaError = EpochError::InvariantViolated {
        user_id: "U123".into(),
        active_count: 2,
    }
    .into();
    let msg = err.to_string();
    assert!(msg.contains("U123"));
    assert!(msg.contains('2'));
    assert!(err.is_invariant_violation());
    assert!(!err.is_embedding_unavailable());
}

#[test]
fn embedding_unavailable_carries_provider() {
    let err: KirokumaError = EmbeddingError::Unavailable {
        provider: "text-embedding-3-small".into(),
        reason: "HTTP 503".into(),
    }
    .into();
    assert!(err.is_embedding_unavailable());
    assert!(err.to_string().contains("HTTP 503"));
}

#[test]
fn store_unavailable_is_not_an_invariant_violation() {
    let err: KirokumaError = StorageError::Unavailable {
        message: "database is locked".into(),
    }
    .into();
    assert!(!err.is_invariant_violation());
    assert!(err.to_string().contains("database is locked"));
}

#[test]
fn config_error_converts_into_top_level() {
    let err: KirokumaError = ConfigError::ValidationFailed {
        field: "trend.pair_threshold".into(),
        message: "must be between 0.0 and 1.0".into(),
    }
    .into();
    assert!(matches!(err, KirokumaError::ConfigError(_)));
    assert!(err.to_string().contains("trend.pair_threshold"));
}
