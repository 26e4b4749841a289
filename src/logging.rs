// src/logging.rs

//! Logging setup for `dxlaunch` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the launcher's own log level:
//! 1. the engine `--loglevel` flag, when it maps onto a tracing level
//! 2. `DXLAUNCH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR; the engine inherits STDOUT untouched.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::types::WorkerLogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(engine_level: Option<WorkerLogLevel>) -> Result<()> {
    let level = engine_level
        .map(level_from_worker_level)
        .or_else(|| {
            std::env::var("DXLAUNCH_LOG")
                .ok()
                .and_then(|s| parse_level_str(&s))
        })
        .unwrap_or(tracing::Level::INFO);

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    Ok(())
}

pub fn level_from_worker_level(lvl: WorkerLogLevel) -> tracing::Level {
    match lvl {
        WorkerLogLevel::All | WorkerLogLevel::Trace => tracing::Level::TRACE,
        WorkerLogLevel::Debug => tracing::Level::DEBUG,
        WorkerLogLevel::Info => tracing::Level::INFO,
        WorkerLogLevel::Warn => tracing::Level::WARN,
        // The launcher still reports signal handling when the engine is silenced.
        WorkerLogLevel::Error | WorkerLogLevel::Off => tracing::Level::ERROR,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
