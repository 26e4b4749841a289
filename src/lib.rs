// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod plugin_template;
pub mod resolve;
pub mod supervise;
pub mod types;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::command::{CommandAssembler, LaunchContext};
use crate::config::{load_and_validate, Installation, LauncherConfig};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::supervise::signals::{self, TerminationSignals};
use crate::supervise::{Supervisor, EXIT_FAIL, EXIT_OK};

/// High-level entry point used by `main.rs`.
///
/// Locates the installation, loads the engine profile and installs the
/// platform's termination signal handlers, then hands over to [`launch`].
/// Returns the launcher's exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let install = Installation::discover()?;
    let fs = RealFileSystem;
    let config = load_and_validate(&fs, install.profile_path())?;
    debug!(home = %install.home().display(), engine = %config.engine.name, "installation located");

    // Installed before anything is spawned so no signal can slip past the child.
    let signals = signals::platform()?;

    launch(&args, &fs, &install, &config, signals).await
}

/// Dispatch on the operating mode: version, template display or run.
pub async fn launch(
    args: &CliArgs,
    fs: &dyn FileSystem,
    install: &Installation,
    config: &LauncherConfig,
    signals: Option<Box<dyn TerminationSignals>>,
) -> Result<i32> {
    if args.version {
        println!("{}", version_banner(fs, install, config));
        return Ok(EXIT_OK);
    }

    if let Some((reader, writer)) = args.template_request() {
        plugin_template::show(fs, install, &config.engine, reader, writer)?;
        return Ok(EXIT_OK);
    }

    let job = match args.job_descriptor() {
        Ok(job) => job,
        Err(e) => {
            warn!(error = %e, "invalid invocation");
            cli::print_help();
            return Ok(EXIT_FAIL);
        }
    };

    let target = resolve::resolve(job)?;
    info!(job = %target, remote = target.is_remote(), "resolved job descriptor");

    let options = args.runtime_options(&install.default_log_dir());
    let command =
        CommandAssembler::new(install, config).assemble(&options, &target, &LaunchContext::now())?;
    debug!(command = %command, "start command");

    Supervisor::new(signals, config.grace_period())
        .run(&command)
        .await
}

/// `"<name> <version>"`, with an empty version when no core jar is found.
pub fn version_banner(fs: &dyn FileSystem, install: &Installation, config: &LauncherConfig) -> String {
    let version = install
        .core_version(fs, &config.engine.prefix)
        .unwrap_or_default();
    format!("{} {}", config.engine.name, version)
}
