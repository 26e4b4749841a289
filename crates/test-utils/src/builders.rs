#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use dxlaunch::command::{LaunchContext, RuntimeOptions};
use dxlaunch::config::{LauncherConfig, RawLauncherConfig};
use dxlaunch::types::{ExecutionMode, WorkerLogLevel};

/// Fixed clock and pid: 2024-03-09 07:05:01, pid 4242.
pub fn fixed_context() -> LaunchContext {
    let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(7, 5, 1))
        .expect("valid timestamp");
    LaunchContext::new(ts, 4242)
}

/// Built-in engine profile.
pub fn default_config() -> LauncherConfig {
    LauncherConfig::try_from(RawLauncherConfig::default()).expect("defaults validate")
}

/// Engine profile with a custom command template and program.
pub fn config_with_template(java: &str, template: &str) -> LauncherConfig {
    let mut raw = RawLauncherConfig::default();
    raw.engine.java = java.to_string();
    raw.engine.command_template = template.to_string();
    LauncherConfig::try_from(raw).expect("template validates")
}

/// Builder for `RuntimeOptions`.
pub struct RuntimeOptionsBuilder {
    options: RuntimeOptions,
}

impl RuntimeOptionsBuilder {
    pub fn new(log_dir: &str) -> Self {
        Self {
            options: RuntimeOptions::new(PathBuf::from(log_dir)),
        }
    }

    pub fn jvm(mut self, flags: &str) -> Self {
        self.options.jvm_flags = Some(flags.to_string());
        self
    }

    pub fn params(mut self, params: &str) -> Self {
        self.options.params = Some(params.to_string());
        self
    }

    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn job_id(mut self, id: &str) -> Self {
        self.options.job_id = id.to_string();
        self
    }

    pub fn log_level(mut self, level: WorkerLogLevel) -> Self {
        self.options.log_level = level;
        self
    }

    pub fn remote_debug(mut self) -> Self {
        self.options.remote_debug = true;
        self
    }

    pub fn build(self) -> RuntimeOptions {
        self.options
    }
}
