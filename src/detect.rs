//! Detect phase
//!
//! Decides whether this buildpack applies and which dependencies the launch
//! process will need. Participation requires either an explicit
//! `BP_POETRY_RUN_TARGET` or a manifest declaring exactly one script;
//! declining is an expected outcome, not an error.

use crate::buildplan::{BuildPlan, Requirement};
use crate::cnb::DetectContext;
use crate::config::BuildpackConfig;
use crate::pyproject::{ParseError, PyProjectParser};
use crate::reload::{ReloadError, Reloader};
use crate::{CPYTHON, POETRY, POETRY_VENV, WATCHEXEC};
use thiserror::Error;
use tracing::debug;

/// Name of the manifest consulted for script inference.
pub const PYPROJECT_TOML: &str = "pyproject.toml";

const FAIL_REASON: &str = "Expects one and exactly one script defined in pyproject.toml";

/// Outcome of the detect phase.
///
/// The lifecycle distinguishes "does not apply" from "broke" by exit code,
/// so non-participation is modeled as a passing result with a reason rather
/// than as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectOutcome {
    /// The buildpack applies; the plan lists its requirements.
    Pass(BuildPlan),

    /// The buildpack does not apply.
    Fail { reason: String },
}

/// Errors that abort detection outright, propagated verbatim.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Reload(#[from] ReloadError),
}

/// Runs detection against `context.working_dir`.
pub fn detect(
    context: &DetectContext,
    config: &BuildpackConfig,
    parser: &dyn PyProjectParser,
    reloader: &dyn Reloader,
) -> Result<DetectOutcome, DetectError> {
    if let Some(run_target) = config.run_target.as_deref() {
        debug!(run_target, "run target overridden, skipping pyproject.toml");
    } else {
        let manifest = context.working_dir.join(PYPROJECT_TOML);
        match parser.parse(&manifest)? {
            Some(script) => debug!(%script, "found script in pyproject.toml"),
            None => {
                return Ok(DetectOutcome::Fail {
                    reason: FAIL_REASON.to_string(),
                })
            }
        }
    }

    let mut plan = BuildPlan {
        provides: vec![],
        requires: vec![
            Requirement::launch(CPYTHON),
            Requirement::launch(POETRY),
            Requirement::launch(POETRY_VENV),
        ],
    };

    if reloader.should_enable_live_reload(config)? {
        plan.requires.push(Requirement::launch(WATCHEXEC));
    }

    Ok(DetectOutcome::Pass(plan))
}
