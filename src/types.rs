use std::fmt;

use clap::ValueEnum;

/// Engine execution mode, passed to the engine as `-mode <mode>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExecutionMode {
    Standalone,
    Local,
    Distribute,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Standalone
    }
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Standalone => "standalone",
            ExecutionMode::Local => "local",
            ExecutionMode::Distribute => "distribute",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log level handed to the engine as `-Dloglevel=<level>`.
///
/// `All` and `Off` are logback levels with no direct `tracing` equivalent;
/// see [`crate::logging`] for how the launcher maps them for its own output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkerLogLevel {
    All,
    Trace,
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
    Off,
}

impl Default for WorkerLogLevel {
    fn default() -> Self {
        WorkerLogLevel::Info
    }
}

impl WorkerLogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerLogLevel::All => "all",
            WorkerLogLevel::Trace => "trace",
            WorkerLogLevel::Debug => "debug",
            WorkerLogLevel::Info => "info",
            WorkerLogLevel::Warn => "warn",
            WorkerLogLevel::Error => "error",
            WorkerLogLevel::Off => "off",
        }
    }
}

impl fmt::Display for WorkerLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
