// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use crate::command::assemble::DEFAULT_JOB_ID;
use crate::command::RuntimeOptions;
use crate::errors::{LauncherError, Result};
use crate::supervise::{EXIT_FAIL, EXIT_OK};
use crate::types::{ExecutionMode, WorkerLogLevel};

/// Command-line arguments for `dxlaunch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dxlaunch",
    about = "Launch and supervise a data-integration engine job.",
    override_usage = "dxlaunch [OPTIONS] <JOB-URL-OR-PATH>\n       dxlaunch -r <READER> -w <WRITER>",
    disable_version_flag = true,
    long_about = None
)]
pub struct CliArgs {
    /// Print version and exit.
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Extra JVM flags, appended after the defaults.
    #[arg(short = 'j', long, value_name = "JVM FLAGS", allow_hyphen_values = true)]
    pub jvm: Option<String>,

    /// Job unique id when running in local or distribute mode.
    #[arg(long, value_name = "ID", default_value = DEFAULT_JOB_ID, allow_hyphen_values = true)]
    pub jobid: String,

    /// Job runtime mode.
    #[arg(short = 'm', long, value_enum, ignore_case = true, default_value_t = ExecutionMode::Standalone)]
    pub mode: ExecutionMode,

    /// Job parameters, e.g. -p "-DtableName=orders -Dday=20240301".
    ///
    /// Reference them in the job file as `${tableName}`.
    #[arg(short = 'p', long, value_name = "PARAMS", allow_hyphen_values = true)]
    pub params: Option<String>,

    /// Show the job template for this reader plugin (needs --writer).
    #[arg(short = 'r', long, value_name = "READER")]
    pub reader: Option<String>,

    /// Show the job template for this writer plugin (needs --reader).
    #[arg(short = 'w', long, value_name = "WRITER")]
    pub writer: Option<String>,

    /// Directory the engine writes its log to [default: <home>/log].
    #[arg(short = 'l', long, value_name = "DIR")]
    pub logdir: Option<PathBuf>,

    /// Start the engine with a remote debugger listener.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Engine log level; `debug` also prints the engine command.
    #[arg(long, value_enum, ignore_case = true, value_name = "LEVEL")]
    pub loglevel: Option<WorkerLogLevel>,

    /// Job descriptor: local path, file:// path or http(s) URL.
    #[arg(value_name = "JOB-URL-OR-PATH")]
    pub job: Vec<String>,
}

impl CliArgs {
    /// Reader and writer names when template-display mode is requested.
    pub fn template_request(&self) -> Option<(&str, &str)> {
        match (&self.reader, &self.writer) {
            (Some(reader), Some(writer)) => Some((reader.as_str(), writer.as_str())),
            _ => None,
        }
    }

    /// The single positional job descriptor required in run mode.
    pub fn job_descriptor(&self) -> Result<&str> {
        match self.job.as_slice() {
            [job] => Ok(job.as_str()),
            other => Err(LauncherError::Usage(format!(
                "expected exactly one job descriptor, got {}",
                other.len()
            ))),
        }
    }

    pub fn runtime_options(&self, default_log_dir: &Path) -> RuntimeOptions {
        let mut options = RuntimeOptions::new(
            self.logdir
                .clone()
                .unwrap_or_else(|| default_log_dir.to_path_buf()),
        );
        options.jvm_flags = self.jvm.clone();
        options.mode = self.mode;
        options.job_id = self.jobid.clone();
        options.log_level = self.loglevel.unwrap_or_default();
        options.params = self.params.clone();
        options.remote_debug = self.debug;
        options
    }
}

/// Parse `std::env::args`, exiting on malformed input.
///
/// `--help` exits 0; any parse error exits with the launcher's failure code.
pub fn parse_or_exit() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_FAIL } else { EXIT_OK };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

pub fn print_help() {
    let _ = CliArgs::command().print_help();
    println!();
}
