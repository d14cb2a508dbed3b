//! Logging setup shared by the web host and the CLI.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when neither `RUST_LOG` nor the config says otherwise
pub fn default_filter(level: &str) -> String {
    format!("bichance={level},tower_http={level}")
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level; `format = "json"` switches to structured output.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Quiet logging for interactive CLI use: warnings to stderr only
pub fn init_cli(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let directive = default_filter("info");
        assert_eq!(directive, "bichance=info,tower_http=info");
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
