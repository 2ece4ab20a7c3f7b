//! Structured logging setup
//!
//! Build narration goes through the `tracing` ecosystem, initialized once per
//! invocation. The level comes from `BP_LOG_LEVEL` (the buildpack logging
//! convention) unless `RUST_LOG` takes over, and output lands on stderr so
//! stdout stays free for the lifecycle's own protocol.
//!
//! # Example
//!
//! ```no_run
//! use poetry_run_buildpack::util::logging;
//!
//! // With environment: BP_LOG_LEVEL=debug
//! logging::init_from_env();
//!
//! tracing::info!("assigning launch processes");
//! ```

use crate::config::ENV_LOG_LEVEL;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Variable toggling JSON log output.
pub const ENV_LOG_JSON: &str = "BP_LOG_JSON";

/// Configuration for logging initialization.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display.
    pub level: Level,

    /// Use JSON output instead of the human console format.
    pub use_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
        }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the specified level.
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Parses a log level from a string (case-insensitive), defaulting to INFO.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Initializes the logging system with the provided configuration.
///
/// Can only be called once; subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter.add_directive(
                format!("poetry_run_buildpack={}", config.level)
                    .parse()
                    .unwrap(),
            );
        }

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
    });
}

/// Initializes logging from `BP_LOG_LEVEL` and `BP_LOG_JSON`.
pub fn init_from_env() {
    let level_str = env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
    let use_json = env::var(ENV_LOG_JSON)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level: parse_level(&level_str),
        use_json,
    });
}
