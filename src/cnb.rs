//! Lifecycle file contract
//!
//! The CNB lifecycle invokes the buildpack twice: `detect <platform> <plan>`
//! and `build <layers> <platform> <plan>`, each in the application directory.
//! This module holds the phase contexts assembled from those arguments, the
//! buildpack descriptor, and the writers for the Build Plan and `launch.toml`
//! files the lifecycle consumes.

use crate::buildplan::BuildPlan;
use crate::launch::LaunchMetadata;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exit code for a passing detect phase.
pub const EXIT_DETECT_PASS: i32 = 0;

/// Exit code the lifecycle expects when the buildpack declines to
/// participate.
pub const EXIT_DETECT_FAIL: i32 = 100;

/// Variable the lifecycle sets to the buildpack's own directory.
pub const ENV_BUILDPACK_DIR: &str = "CNB_BUILDPACK_DIR";

const BUILDPACK_TOML: &str = "buildpack.toml";
const LAUNCH_TOML: &str = "launch.toml";

/// Errors raised by the file contract.
#[derive(Debug, Error)]
pub enum CnbError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: toml::ser::Error,
    },

    #[error("failed to resolve the working directory: {0}")]
    WorkingDir(#[source] io::Error),
}

/// Identity block from `buildpack.toml`, used for the build log title line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildpackInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct BuildpackDescriptor {
    buildpack: BuildpackInfo,
}

impl BuildpackInfo {
    /// Reads the `[buildpack]` table from `<dir>/buildpack.toml`.
    pub fn from_buildpack_dir(dir: &Path) -> Result<Self, CnbError> {
        let path = dir.join(BUILDPACK_TOML);
        let raw = fs::read_to_string(&path).map_err(|source| CnbError::Read {
            path: path.clone(),
            source,
        })?;
        let descriptor: BuildpackDescriptor =
            toml::from_str(&raw).map_err(|source| CnbError::Parse {
                path,
                source: Box::new(source),
            })?;
        Ok(descriptor.buildpack)
    }

    /// Resolves the descriptor from `CNB_BUILDPACK_DIR`, falling back to an
    /// empty identity when the lifecycle did not provide one. The identity
    /// only feeds log output, so its absence is not fatal.
    pub fn from_env() -> Self {
        env::var(ENV_BUILDPACK_DIR)
            .ok()
            .and_then(|dir| Self::from_buildpack_dir(Path::new(&dir)).ok())
            .unwrap_or_default()
    }
}

/// Inputs to the detect phase.
#[derive(Debug, Clone)]
pub struct DetectContext {
    /// Application directory the phase runs in.
    pub working_dir: PathBuf,

    /// Platform directory provided by the lifecycle.
    pub platform_dir: PathBuf,

    /// Where to write the Build Plan on a passing detection.
    pub plan_path: PathBuf,
}

impl DetectContext {
    /// Builds the context from the lifecycle's arguments; the working
    /// directory is the process working directory per the phase contract.
    pub fn new(platform_dir: PathBuf, plan_path: PathBuf) -> Result<Self, CnbError> {
        Ok(Self {
            working_dir: env::current_dir().map_err(CnbError::WorkingDir)?,
            platform_dir,
            plan_path,
        })
    }
}

/// Inputs to the build phase.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Application directory the phase runs in.
    pub working_dir: PathBuf,

    /// Layers directory; `launch.toml` lands here.
    pub layers_dir: PathBuf,

    /// Platform directory provided by the lifecycle.
    pub platform_dir: PathBuf,

    /// Buildpack Plan file resolved from the detect phase.
    pub plan_path: PathBuf,

    /// Identity of this buildpack.
    pub buildpack: BuildpackInfo,
}

impl BuildContext {
    pub fn new(
        layers_dir: PathBuf,
        platform_dir: PathBuf,
        plan_path: PathBuf,
        buildpack: BuildpackInfo,
    ) -> Result<Self, CnbError> {
        Ok(Self {
            working_dir: env::current_dir().map_err(CnbError::WorkingDir)?,
            layers_dir,
            platform_dir,
            plan_path,
            buildpack,
        })
    }
}

/// Writes the Build Plan file declared by a passing detection.
pub fn write_build_plan(path: &Path, plan: &BuildPlan) -> Result<(), CnbError> {
    let rendered = toml::to_string(plan).map_err(|source| CnbError::Serialize {
        what: "build plan",
        source,
    })?;
    fs::write(path, rendered).map_err(|source| CnbError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `launch.toml` under the layers directory and returns its path.
pub fn write_launch_metadata(
    layers_dir: &Path,
    launch: &LaunchMetadata,
) -> Result<PathBuf, CnbError> {
    let path = layers_dir.join(LAUNCH_TOML);
    let rendered = toml::to_string(launch).map_err(|source| CnbError::Serialize {
        what: "launch metadata",
        source,
    })?;
    fs::write(&path, rendered).map_err(|source| CnbError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
