// src/supervise/mod.rs

//! Engine process supervision.
//!
//! - [`core`] is a synchronous state machine: events in, commands out. It
//!   decides every exit code and owns the terminate-once rule.
//! - [`signals`] abstracts where termination signals come from; platforms
//!   without POSIX signals have no source at all.
//! - [`runner`] is the async shell: it spawns the child, feeds the core
//!   with child-exit, signal and timer events, and carries out its commands.

use std::fmt;

pub mod core;
pub mod runner;
pub mod signals;

pub use self::core::SupervisorCore;
pub use runner::Supervisor;
pub use signals::TerminationSignals;

/// Launcher exit code for success, `--version` and template display.
pub const EXIT_OK: i32 = 0;
/// Launcher exit code for usage errors and uncaught failures.
pub const EXIT_FAIL: i32 = -1;
/// Launcher exit code after a termination signal, whatever the child did.
pub const EXIT_KILLED: i32 = 143;

/// Signals that make the launcher take its engine down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Quit,
    Terminate,
}

impl TerminationSignal {
    pub fn number(&self) -> i32 {
        match self {
            TerminationSignal::Interrupt => 2,
            TerminationSignal::Quit => 3,
            TerminationSignal::Terminate => 15,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Quit => "SIGQUIT",
            TerminationSignal::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.number())
    }
}

/// Supervisor lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    NotStarted,
    Running,
    Terminating,
    /// The child exited by itself (possibly during the grace period).
    Completed(i32),
    /// The grace period ran out and the child was force-killed.
    Killed,
}

/// Inputs to [`SupervisorCore::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorEvent {
    Spawned,
    ChildExited(i32),
    SignalReceived(TerminationSignal),
    GraceElapsed,
}

/// Actions the shell must perform, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorCommand {
    /// Ask the child to quit (SIGQUIT where available).
    SendQuit,
    /// Arm the grace-period timer.
    StartGrace,
    ForceKill,
    /// Stop supervising and exit the launcher with this code.
    Exit(i32),
}
