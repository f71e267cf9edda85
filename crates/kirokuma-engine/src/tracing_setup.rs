//! Tracing subscriber setup.

use kirokuma_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "KIROKUMA_LOG";

/// Install the global subscriber. `KIROKUMA_LOG` wins over
/// `config.log_level`. Returns false if a subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

/// Install a subscriber with an explicit filter (tests, embedding hosts).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        let config = ObservabilityConfig::default();
        // Another test may have installed the subscriber first.
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
        assert!(!init_tracing_with_filter("debug"));
    }
}
