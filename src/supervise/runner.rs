// src/supervise/runner.rs

use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::command::InvocationCommand;
use crate::errors::{LauncherError, Result};
use crate::supervise::signals::TerminationSignals;
use crate::supervise::{SupervisorCommand, SupervisorCore, SupervisorEvent, TerminationSignal};

/// Runs one engine process to completion.
///
/// This is the IO shell around [`SupervisorCore`]: it owns the child handle
/// and the signal source, and nothing else touches either.
pub struct Supervisor {
    signals: Option<Box<dyn TerminationSignals>>,
    grace_period: Duration,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("signals", &self.signals.is_some())
            .field("grace_period", &self.grace_period)
            .finish()
    }
}

impl Supervisor {
    pub fn new(signals: Option<Box<dyn TerminationSignals>>, grace_period: Duration) -> Self {
        Self {
            signals,
            grace_period,
        }
    }

    /// Spawn `command` and supervise it until the launcher should exit.
    ///
    /// Returns the launcher exit code: the child's own code on a natural
    /// exit, [`crate::supervise::EXIT_KILLED`] after a termination signal.
    /// Only a failure to spawn or wait is an `Err`.
    pub async fn run(mut self, command: &InvocationCommand) -> Result<i32> {
        let mut core = SupervisorCore::new();

        // Signals may already be pending from before the spawn.
        if let Some(signal) = self.poll_pending_signal() {
            if let Some(code) = exit_code_of(&core.step(SupervisorEvent::SignalReceived(signal))) {
                return Ok(code);
            }
        }

        let mut child = spawn(command)?;
        info!(pid = child.id(), program = %command.program(), "engine process started");
        core.step(SupervisorEvent::Spawned);

        let mut grace_deadline: Option<Instant> = None;

        loop {
            let event = tokio::select! {
                status = child.wait() => {
                    let status = status.map_err(LauncherError::Wait)?;
                    SupervisorEvent::ChildExited(status_code(status))
                }
                Some(signal) = next_signal(&mut self.signals) => {
                    SupervisorEvent::SignalReceived(signal)
                }
                () = grace_elapsed(grace_deadline) => SupervisorEvent::GraceElapsed,
            };

            for action in core.step(event) {
                match action {
                    SupervisorCommand::SendQuit => request_quit(&child),
                    SupervisorCommand::StartGrace => {
                        grace_deadline = Some(Instant::now() + self.grace_period);
                    }
                    SupervisorCommand::ForceKill => force_kill(&mut child).await,
                    SupervisorCommand::Exit(code) => {
                        debug!(state = ?core.state(), exit_code = code, "supervisor finished");
                        return Ok(code);
                    }
                }
            }
        }
    }

    /// Non-blocking check for a signal that arrived before the spawn.
    fn poll_pending_signal(&mut self) -> Option<TerminationSignal> {
        use std::task::{Context, Poll, Waker};

        let signals = self.signals.as_mut()?;
        let mut cx = Context::from_waker(Waker::noop());
        match signals.recv().as_mut().poll(&mut cx) {
            Poll::Ready(signal) => signal,
            Poll::Pending => None,
        }
    }
}

fn spawn(command: &InvocationCommand) -> Result<Child> {
    let mut cmd = Command::new(command.program());
    cmd.args(command.args()).kill_on_drop(true);

    cmd.spawn().map_err(|source| LauncherError::Spawn {
        program: command.program().to_string(),
        source,
    })
}

async fn next_signal(
    signals: &mut Option<Box<dyn TerminationSignals>>,
) -> Option<TerminationSignal> {
    match signals {
        Some(source) => source.recv().await,
        None => std::future::pending().await,
    }
}

async fn grace_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn exit_code_of(commands: &[SupervisorCommand]) -> Option<i32> {
    commands.iter().find_map(|c| match c {
        SupervisorCommand::Exit(code) => Some(*code),
        _ => None,
    })
}

/// Exit code, or `-<signal>` when the child was killed by a signal.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

#[cfg(unix)]
fn request_quit(child: &Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        debug!("engine process already reaped; skipping SIGQUIT");
        return;
    };

    match i32::try_from(pid) {
        Ok(raw) => {
            if let Err(e) = kill(Pid::from_raw(raw), Signal::SIGQUIT) {
                warn!(pid, error = %e, "failed to send SIGQUIT to engine process");
            }
        }
        Err(_) => warn!(pid, "engine pid out of range; skipping SIGQUIT"),
    }
}

#[cfg(not(unix))]
fn request_quit(_child: &Child) {
    debug!("no graceful quit on this platform; waiting for grace period before kill");
}

async fn force_kill(child: &mut Child) {
    match child.kill().await {
        Ok(()) => warn!("engine process was killed"),
        Err(e) => warn!(error = %e, "failed to kill engine process"),
    }
}
