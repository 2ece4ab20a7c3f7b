use poetry_run_buildpack::cli::{BuildArgs, CliArgs, Commands, DetectArgs};
use poetry_run_buildpack::cnb::{
    self, BuildContext, BuildpackInfo, DetectContext, EXIT_DETECT_FAIL, EXIT_DETECT_PASS,
};
use poetry_run_buildpack::util::logging;
use poetry_run_buildpack::{BuildpackConfig, DetectOutcome, PyProjectTomlParser, WatchexecReloader};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("poetry-run-buildpack v{} starting", poetry_run_buildpack::VERSION);

    let config = BuildpackConfig::from_env();
    let parser = PyProjectTomlParser::new();
    let reloader = WatchexecReloader::new();

    let result = match &args.command {
        Commands::Detect(detect_args) => run_detect(detect_args, &config, &parser, &reloader),
        Commands::Build(build_args) => run_build(build_args, &config, &parser, &reloader),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run_detect(
    args: &DetectArgs,
    config: &BuildpackConfig,
    parser: &PyProjectTomlParser,
    reloader: &WatchexecReloader,
) -> Result<i32> {
    let context = DetectContext::new(args.platform_dir.clone(), args.build_plan.clone())?;

    match poetry_run_buildpack::detect::detect(&context, config, parser, reloader)? {
        DetectOutcome::Pass(plan) => {
            cnb::write_build_plan(&context.plan_path, &plan)?;
            Ok(EXIT_DETECT_PASS)
        }
        DetectOutcome::Fail { reason } => {
            info!("{reason}");
            Ok(EXIT_DETECT_FAIL)
        }
    }
}

fn run_build(
    args: &BuildArgs,
    config: &BuildpackConfig,
    parser: &PyProjectTomlParser,
    reloader: &WatchexecReloader,
) -> Result<i32> {
    let context = BuildContext::new(
        args.layers_dir.clone(),
        args.platform_dir.clone(),
        args.plan_path.clone(),
        BuildpackInfo::from_env(),
    )?;

    let result = poetry_run_buildpack::build::build(&context, config, parser, reloader)?;
    let path = cnb::write_launch_metadata(&context.layers_dir, &result.launch)?;
    debug!(path = %path.display(), "wrote launch metadata");

    Ok(0)
}

fn init_logging_from_args(args: &CliArgs) {
    if let Some(level_str) = &args.log_level {
        logging::init_logging(logging::LoggingConfig::with_level(logging::parse_level(
            level_str,
        )));
    } else {
        logging::init_from_env();
    }
}
