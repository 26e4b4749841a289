// src/command/assemble.rs

//! Builds the engine invocation from runtime options and a job target.
//!
//! Flag order matters: the engine's JVM takes the last occurrence of a
//! repeated `-X`/`-D` flag, so everything the operator supplies is appended
//! after the built-in defaults.
//!
//! Runtime flags: defaults, `--jvm`, remote-debug, `-Dloglevel`.
//! Job-scoped params: `-D<prefix>.log`, `-Dlog.file.name`, `--params`.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::command::args::split_args;
use crate::command::template::TemplateVars;
use crate::command::InvocationCommand;
use crate::config::{Installation, LauncherConfig};
use crate::errors::{LauncherError, Result};
use crate::resolve::JobTarget;
use crate::types::{ExecutionMode, WorkerLogLevel};

/// Job identifier used when the operator does not supply one.
pub const DEFAULT_JOB_ID: &str = "-1";

/// Operator-supplied options for a single launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Extra JVM flags (`--jvm`), free-form.
    pub jvm_flags: Option<String>,
    pub mode: ExecutionMode,
    pub job_id: String,
    pub log_dir: PathBuf,
    pub log_level: WorkerLogLevel,
    /// Extra job parameters (`--params`), free-form.
    pub params: Option<String>,
    /// Attach a remote debugger listener to the engine JVM.
    pub remote_debug: bool,
}

impl RuntimeOptions {
    /// Options with every field at its default, logging to `log_dir`.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            jvm_flags: None,
            mode: ExecutionMode::default(),
            job_id: DEFAULT_JOB_ID.to_string(),
            log_dir: log_dir.into(),
            log_level: WorkerLogLevel::default(),
            params: None,
            remote_debug: false,
        }
    }
}

/// Per-launch inputs that would otherwise be ambient: the clock and the pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchContext {
    pub timestamp: NaiveDateTime,
    pub pid: u32,
}

impl LaunchContext {
    pub fn new(timestamp: NaiveDateTime, pid: u32) -> Self {
        Self { timestamp, pid }
    }

    pub fn now() -> Self {
        Self::new(chrono::Local::now().naive_local(), std::process::id())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandAssembler<'a> {
    install: &'a Installation,
    config: &'a LauncherConfig,
}

impl<'a> CommandAssembler<'a> {
    pub fn new(install: &'a Installation, config: &'a LauncherConfig) -> Self {
        Self { install, config }
    }

    /// Produce the engine command for `target`.
    ///
    /// Deterministic in its inputs: the same options, target and context
    /// always yield the same command.
    pub fn assemble(
        &self,
        options: &RuntimeOptions,
        target: &JobTarget,
        ctx: &LaunchContext,
    ) -> Result<InvocationCommand> {
        let engine = &self.config.engine;

        let mut vars = TemplateVars::new();
        vars.set_one("java", &engine.java)
            .set("jvm", self.runtime_flags(options)?)
            .set_one("classpath", self.install.classpath(&engine.extra_classpath))
            .set("params", self.job_params(options, target, ctx)?)
            .set_one("entry", &engine.entry_point)
            .set_one("mode", options.mode.as_str())
            .set_one("jobid", &options.job_id)
            .set_one("job", target.as_arg());

        let argv = self.config.template.render(&vars)?;
        Ok(InvocationCommand::from_argv(argv)?)
    }

    /// Flags every engine JVM starts with.
    pub fn base_runtime_flags(&self) -> Result<Vec<String>> {
        let engine = &self.config.engine;
        let home = self.install.home().display();

        let mut flags = split_args(&engine.heap_flags)?;
        flags.extend([
            "-XX:+HeapDumpOnOutOfMemoryError".to_string(),
            format!("-XX:HeapDumpPath={home}"),
            format!("-Dfile.encoding={}", engine.file_encoding),
            "-Dlogback.statusListenerClass=ch.qos.logback.core.status.NopStatusListener"
                .to_string(),
            "-Djava.security.egd=file:///dev/urandom".to_string(),
            format!("-D{}.home={home}", engine.prefix),
            format!(
                "-Dlogback.configurationFile={}",
                self.install.logback_file().display()
            ),
        ]);
        Ok(flags)
    }

    pub fn runtime_flags(&self, options: &RuntimeOptions) -> Result<Vec<String>> {
        let mut flags = self.base_runtime_flags()?;

        if let Some(jvm) = options.jvm_flags.as_deref() {
            flags.extend(operator_words("--jvm", jvm)?);
        }
        if options.remote_debug {
            flags.extend(split_args(&self.config.engine.remote_debug)?);
        }
        flags.push(format!("-Dloglevel={}", options.log_level));

        Ok(flags)
    }

    pub fn job_params(
        &self,
        options: &RuntimeOptions,
        target: &JobTarget,
        ctx: &LaunchContext,
    ) -> Result<Vec<String>> {
        let prefix = &self.config.engine.prefix;

        let mut params = vec![
            format!("-D{prefix}.log={}", options.log_dir.display()),
            format!(
                "-Dlog.file.name={}",
                log_file_name(prefix, &target.display_name(), ctx)
            ),
        ];
        if let Some(extra) = options.params.as_deref() {
            params.extend(operator_words("--params", extra)?);
        }

        Ok(params)
    }
}

/// `<prefix>_<display>_<YYYYMMDD_HHMMSS>_<pid>.log`
pub fn log_file_name(prefix: &str, display_name: &str, ctx: &LaunchContext) -> String {
    format!(
        "{prefix}_{display_name}_{}_{}.log",
        ctx.timestamp.format("%Y%m%d_%H%M%S"),
        ctx.pid
    )
}

fn operator_words(flag: &str, value: &str) -> Result<Vec<String>> {
    split_args(value).map_err(|e| LauncherError::Usage(format!("{flag}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawLauncherConfig;
    use chrono::NaiveDate;

    fn ctx() -> LaunchContext {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(7, 5, 1))
            .unwrap();
        LaunchContext::new(ts, 4242)
    }

    fn config() -> LauncherConfig {
        LauncherConfig::try_from(RawLauncherConfig::default()).unwrap()
    }

    #[test]
    fn log_file_name_has_fixed_shape() {
        assert_eq!(
            log_file_name("datax", "job", &ctx()),
            "datax_job_20240309_070501_4242.log"
        );
    }

    #[test]
    fn operator_jvm_flags_follow_defaults() {
        let install = Installation::new("/opt/dx");
        let config = config();
        let asm = CommandAssembler::new(&install, &config);

        let mut options = RuntimeOptions::new("/opt/dx/log");
        options.jvm_flags = Some("-Xms1g -Xmx8g".to_string());
        options.remote_debug = true;
        options.log_level = WorkerLogLevel::Debug;

        let flags = asm.runtime_flags(&options).unwrap();
        let pos = |needle: &str| flags.iter().position(|f| f == needle).unwrap();

        assert!(pos("-Xmx2g") < pos("-Xmx8g"));
        assert!(pos("-Dlogback.configurationFile=/opt/dx/conf/logback.xml") < pos("-Xms1g"));
        assert!(pos("-Xmx8g") < pos("-Xdebug"));
        assert_eq!(flags.last().map(String::as_str), Some("-Dloglevel=debug"));
    }

    #[test]
    fn operator_params_follow_log_params() {
        let install = Installation::new("/opt/dx");
        let config = config();
        let asm = CommandAssembler::new(&install, &config);

        let mut options = RuntimeOptions::new("/var/log/dx");
        options.params = Some("-DtableName=orders -Dlog.file.name=custom.log".to_string());

        let target = JobTarget::Local(PathBuf::from("/tmp/orders.json"));
        let params = asm.job_params(&options, &target, &ctx()).unwrap();

        assert_eq!(
            params,
            vec![
                "-Ddatax.log=/var/log/dx",
                "-Dlog.file.name=datax_orders_20240309_070501_4242.log",
                "-DtableName=orders",
                "-Dlog.file.name=custom.log",
            ]
        );
    }

    #[test]
    fn bad_operator_quoting_is_a_usage_error() {
        let install = Installation::new("/opt/dx");
        let config = config();
        let asm = CommandAssembler::new(&install, &config);

        let mut options = RuntimeOptions::new("/opt/dx/log");
        options.params = Some("-Dname='unterminated".to_string());

        let target = JobTarget::Local(PathBuf::from("/tmp/job.json"));
        match asm.job_params(&options, &target, &ctx()) {
            Err(LauncherError::Usage(msg)) => assert!(msg.starts_with("--params")),
            other => panic!("expected usage error, got {other:?}"),
        }
    }
}
