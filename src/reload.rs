//! Live reload decision
//!
//! Operators opt into a supervised launch process by setting
//! `BP_LIVE_RELOAD_ENABLED`. Both phases consult the same decision: detect
//! adds a `watchexec` requirement to the Build Plan, build wraps the launch
//! command in the supervisor.

use crate::config::{BuildpackConfig, ENV_LIVE_RELOAD};
use std::str::ParseBoolError;
use thiserror::Error;

/// Error raised for a malformed toggle value.
#[derive(Debug, Error)]
#[error("failed to parse {var} value {value}: {source}")]
pub struct ReloadError {
    pub var: &'static str,
    pub value: String,
    #[source]
    pub source: ParseBoolError,
}

/// Decides whether the launch process should be wrapped for live reload.
pub trait Reloader {
    /// Returns whether live reload is enabled.
    ///
    /// # Errors
    ///
    /// Fails when the toggle is set to something that does not parse as a
    /// boolean; the failure aborts whichever phase asked.
    fn should_enable_live_reload(&self, config: &BuildpackConfig) -> Result<bool, ReloadError>;
}

/// Production [`Reloader`] keyed on `BP_LIVE_RELOAD_ENABLED`, named for the
/// watchexec supervisor it requests.
#[derive(Debug, Default)]
pub struct WatchexecReloader;

impl WatchexecReloader {
    pub fn new() -> Self {
        Self
    }
}

impl Reloader for WatchexecReloader {
    fn should_enable_live_reload(&self, config: &BuildpackConfig) -> Result<bool, ReloadError> {
        let Some(raw) = config.live_reload.as_deref() else {
            return Ok(false);
        };

        parse_toggle(raw).map_err(|source| ReloadError {
            var: ENV_LIVE_RELOAD,
            value: raw.to_string(),
            source,
        })
    }
}

// Accepts the spellings operators already use with this variable: 1/0, t/f
// and true/false in any casing.
fn parse_toggle(raw: &str) -> Result<bool, ParseBoolError> {
    match raw {
        "1" | "t" | "T" => Ok(true),
        "0" | "f" | "F" => Ok(false),
        _ => raw.to_ascii_lowercase().parse::<bool>(),
    }
}
