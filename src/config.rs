//! Environment-derived buildpack configuration
//!
//! Operators steer the buildpack through `BP_*` environment variables. They
//! are read once, up front, into a [`BuildpackConfig`] that is passed into
//! both phases; nothing else in the crate touches the process environment,
//! which keeps detect and build testable with injected values.
//!
//! # Environment Variables
//!
//! - `BP_POETRY_RUN_TARGET`: run target override (a script name or a
//!   whitespace-separated command); bypasses `pyproject.toml` inference
//! - `BP_LIVE_RELOAD_ENABLED`: boolean-like toggle requesting a supervised,
//!   restart-on-change launch process - default: disabled
//! - `BP_LOG_LEVEL`: logging level - default: "info"

use std::env;

/// Run target override variable.
pub const ENV_RUN_TARGET: &str = "BP_POETRY_RUN_TARGET";

/// Live reload toggle variable.
pub const ENV_LIVE_RELOAD: &str = "BP_LIVE_RELOAD_ENABLED";

/// Log level variable.
pub const ENV_LOG_LEVEL: &str = "BP_LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration snapshot taken from the environment.
#[derive(Debug, Clone, Default)]
pub struct BuildpackConfig {
    /// Run target override, verbatim (`BP_POETRY_RUN_TARGET`).
    pub run_target: Option<String>,

    /// Raw live reload toggle (`BP_LIVE_RELOAD_ENABLED`). Parsed by the
    /// [`Reloader`](crate::reload::Reloader) so that a malformed value fails
    /// the phase consuming it, not configuration loading.
    pub live_reload: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl BuildpackConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            run_target: env::var(ENV_RUN_TARGET).ok(),
            live_reload: env::var(ENV_LIVE_RELOAD).ok(),
            log_level: env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        let _guards = vec![
            EnvGuard::unset(ENV_RUN_TARGET),
            EnvGuard::unset(ENV_LIVE_RELOAD),
            EnvGuard::unset(ENV_LOG_LEVEL),
        ];

        let config = BuildpackConfig::from_env();

        assert_eq!(config.run_target, None);
        assert_eq!(config.live_reload, None);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_reads_environment() {
        let _guards = vec![
            EnvGuard::set(ENV_RUN_TARGET, "a custom command"),
            EnvGuard::set(ENV_LIVE_RELOAD, "true"),
            EnvGuard::set(ENV_LOG_LEVEL, "debug"),
        ];

        let config = BuildpackConfig::from_env();

        assert_eq!(config.run_target.as_deref(), Some("a custom command"));
        assert_eq!(config.live_reload.as_deref(), Some("true"));
        assert_eq!(config.log_level, "debug");
    }
}
