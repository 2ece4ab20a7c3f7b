//! Build phase
//!
//! Re-derives the run target (override first, manifest second), applies the
//! live reload decision, and assembles the launch process list. Detect and
//! build run as separate invocations of the buildpack, so nothing is shared
//! between the phases; each resolves from scratch.

use crate::cnb::BuildContext;
use crate::config::{BuildpackConfig, ENV_RUN_TARGET};
use crate::detect::PYPROJECT_TOML;
use crate::launch::{LaunchMetadata, Process};
use crate::pyproject::{ParseError, PyProjectParser};
use crate::reload::{ReloadError, Reloader};
use thiserror::Error;
use tracing::{debug, info};

const POETRY_COMMAND: &str = "poetry";
const WATCHEXEC_COMMAND: &str = "watchexec";

/// Result of the build phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildResult {
    pub launch: LaunchMetadata,
}

/// Errors that abort the build; collaborator errors propagate verbatim.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Reload(#[from] ReloadError),

    /// Build ran without a resolvable run target. Detection would not have
    /// passed in this state, so this only fires when build runs on its own.
    #[error("unable to determine the poetry run target: set BP_POETRY_RUN_TARGET or define exactly one script in pyproject.toml")]
    MissingRunTarget,
}

/// Runs the build phase and returns the launch metadata to register.
///
/// With live reload disabled the result is a single `web` process running
/// `poetry run <target>`. With it enabled, the default `web` process wraps
/// that command in watchexec and a `no-reload` process keeps the unwrapped
/// command available as an escape hatch.
pub fn build(
    context: &BuildContext,
    config: &BuildpackConfig,
    parser: &dyn PyProjectParser,
    reloader: &dyn Reloader,
) -> Result<BuildResult, BuildError> {
    info!("{} {}", context.buildpack.name, context.buildpack.version);

    debug!("finding the poetry run target");
    let args = resolve_run_args(context, config, parser)?;

    let processes = if reloader.should_enable_live_reload(config)? {
        let mut watch_args = vec![
            "--restart".to_string(),
            "--watch".to_string(),
            context.working_dir.to_string_lossy().into_owned(),
            "--shell".to_string(),
            "none".to_string(),
            "--".to_string(),
            POETRY_COMMAND.to_string(),
        ];
        watch_args.extend(args.iter().cloned());

        vec![
            Process {
                r#type: "web".to_string(),
                command: WATCHEXEC_COMMAND.to_string(),
                args: watch_args,
                default: true,
                direct: true,
            },
            Process {
                r#type: "no-reload".to_string(),
                command: POETRY_COMMAND.to_string(),
                args,
                default: false,
                direct: true,
            },
        ]
    } else {
        vec![Process {
            r#type: "web".to_string(),
            command: POETRY_COMMAND.to_string(),
            args,
            default: true,
            direct: true,
        }]
    };

    info!("assigning launch processes");
    for process in &processes {
        info!("  {process}");
    }

    Ok(BuildResult {
        launch: LaunchMetadata { processes },
    })
}

/// Token list handed to `poetry`: a literal `run` followed by the override
/// tokens or the single inferred script name. The override splits on raw
/// whitespace; quoting is not interpreted.
fn resolve_run_args(
    context: &BuildContext,
    config: &BuildpackConfig,
    parser: &dyn PyProjectParser,
) -> Result<Vec<String>, BuildError> {
    let mut args = vec!["run".to_string()];

    if let Some(target) = config.run_target.as_deref() {
        debug!("found {ENV_RUN_TARGET}={target}");
        args.extend(target.split_whitespace().map(String::from));
    } else {
        let manifest = context.working_dir.join(PYPROJECT_TOML);
        match parser.parse(&manifest)? {
            Some(script) => {
                debug!(%script, "found script in pyproject.toml");
                args.push(script);
            }
            None => return Err(BuildError::MissingRunTarget),
        }
    }

    Ok(args)
}
