//! Cloud Native Buildpack for Poetry-managed Python applications
//!
//! This buildpack participates when a `pyproject.toml` declares exactly one
//! `[tool.poetry.scripts]` entry (or when `BP_POETRY_RUN_TARGET` names the
//! target explicitly), and assigns the image a launch process of
//! `poetry run <target>`.
//!
//! # Lifecycle
//!
//! - [`detect`]: decides participation and contributes a Build Plan requiring
//!   `cpython`, `poetry` and `poetry-venv` at launch, plus `watchexec` when
//!   live reload is requested
//! - [`build`]: assembles the launch process list and registers it with the
//!   lifecycle through `launch.toml`
//!
//! # Project Structure
//!
//! - [`pyproject`]: script resolution from `pyproject.toml`
//! - [`reload`]: live-reload decision from `BP_LIVE_RELOAD_ENABLED`
//! - [`config`]: environment-derived configuration shared by both phases
//! - [`cnb`]: the Build Plan / `launch.toml` file contract with the lifecycle

pub mod build;
pub mod buildplan;
pub mod cli;
pub mod cnb;
pub mod config;
pub mod detect;
pub mod launch;
pub mod pyproject;
pub mod reload;
pub mod util;

// Re-export key types for convenient access
pub use build::{BuildError, BuildResult};
pub use buildplan::{BuildPlan, Provision, Requirement, RequirementMetadata};
pub use cnb::{BuildContext, BuildpackInfo, CnbError, DetectContext};
pub use config::BuildpackConfig;
pub use detect::{DetectError, DetectOutcome};
pub use launch::{LaunchMetadata, Process};
pub use pyproject::{ParseError, PyProjectParser, PyProjectTomlParser};
pub use reload::{ReloadError, Reloader, WatchexecReloader};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Dependency provided by the CPython buildpack.
pub const CPYTHON: &str = "cpython";

/// Dependency provided by the Poetry buildpack.
pub const POETRY: &str = "poetry";

/// Dependency provided by the Poetry Install buildpack.
pub const POETRY_VENV: &str = "poetry-venv";

/// Dependency providing the watchexec supervisor, required only when live
/// reload is enabled.
pub const WATCHEXEC: &str = "watchexec";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_dependency_names() {
        assert_eq!(CPYTHON, "cpython");
        assert_eq!(POETRY, "poetry");
        assert_eq!(POETRY_VENV, "poetry-venv");
        assert_eq!(WATCHEXEC, "watchexec");
    }
}
