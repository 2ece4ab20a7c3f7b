//! Command line interface
//!
//! The lifecycle invokes the buildpack through its `bin/detect` and
//! `bin/build` shims, which forward to the matching subcommand here. The
//! positional arguments follow the CNB phase signatures.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "poetry-run-buildpack",
    about = "Cloud Native Buildpack that configures the launch process for Poetry-managed Python applications",
    version
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        help = "Set logging level (overrides BP_LOG_LEVEL)"
    )]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Decide whether the buildpack applies and emit its Build Plan",
        long_about = "Passes when pyproject.toml declares exactly one [tool.poetry.scripts] \
                      entry or BP_POETRY_RUN_TARGET is set; exits 100 otherwise."
    )]
    Detect(DetectArgs),

    #[command(about = "Assemble the launch process list and write launch.toml")]
    Build(BuildArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PLATFORM_DIR",
        help = "Platform directory provided by the lifecycle"
    )]
    pub platform_dir: PathBuf,

    #[arg(value_name = "BUILD_PLAN", help = "Path of the Build Plan file to write")]
    pub build_plan: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(
        value_name = "LAYERS_DIR",
        help = "Layers directory provided by the lifecycle"
    )]
    pub layers_dir: PathBuf,

    #[arg(
        value_name = "PLATFORM_DIR",
        help = "Platform directory provided by the lifecycle"
    )]
    pub platform_dir: PathBuf,

    #[arg(
        value_name = "BUILDPACK_PLAN",
        help = "Path of the Buildpack Plan file resolved from detection"
    )]
    pub plan_path: PathBuf,
}
