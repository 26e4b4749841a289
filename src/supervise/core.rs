// src/supervise/core.rs

//! Pure supervisor state machine.
//!
//! No Tokio, no processes, no clocks: the shell in
//! [`crate::supervise::runner`] turns the world into [`SupervisorEvent`]s and
//! executes the returned [`SupervisorCommand`]s.
//!
//! ```text
//! NotStarted --Spawned--> Running --ChildExited(n)--> Completed(n)   exit n
//!                            |
//!                      SignalReceived
//!                            v
//!                       Terminating --GraceElapsed--> Killed         exit 143
//!                            |
//!                      ChildExited(n) --> Completed(n)               exit 143
//! ```
//!
//! Once a signal has been observed the exit code is always 143. Further
//! signals while terminating are ignored, so the quit/grace/kill sequence
//! runs exactly once.

use tracing::{debug, error, info, warn};

use crate::supervise::{
    SupervisorCommand, SupervisorEvent, SupervisorState, TerminationSignal, EXIT_KILLED,
};

#[derive(Debug)]
pub struct SupervisorCore {
    state: SupervisorState,
}

impl Default for SupervisorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SupervisorCore {
    pub fn new() -> Self {
        Self {
            state: SupervisorState::NotStarted,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Feed one event and return the commands to execute.
    pub fn step(&mut self, event: SupervisorEvent) -> Vec<SupervisorCommand> {
        use SupervisorCommand::*;
        use SupervisorEvent::*;
        use SupervisorState::*;

        match (self.state, event) {
            (NotStarted, Spawned) => {
                self.state = Running;
                Vec::new()
            }
            (NotStarted, SignalReceived(signal)) => {
                // Handlers are live before the spawn; there is no child to stop.
                log_signal(signal);
                self.state = Killed;
                vec![Exit(EXIT_KILLED)]
            }
            (Running, ChildExited(code)) => {
                info!(exit_code = code, "engine process exited");
                self.state = Completed(code);
                vec![Exit(code)]
            }
            (Running, SignalReceived(signal)) => {
                log_signal(signal);
                self.state = Terminating;
                vec![SendQuit, StartGrace]
            }
            (Terminating, SignalReceived(signal)) => {
                debug!(signal = %signal, "already terminating; ignoring signal");
                Vec::new()
            }
            (Terminating, ChildExited(code)) => {
                warn!(exit_code = code, "engine process exited during grace period");
                self.state = Completed(code);
                vec![Exit(EXIT_KILLED)]
            }
            (Terminating, GraceElapsed) => {
                warn!("grace period elapsed; killing engine process");
                self.state = Killed;
                vec![ForceKill, Exit(EXIT_KILLED)]
            }
            (state, event) => {
                debug!(?state, ?event, "event has no effect in current state");
                Vec::new()
            }
        }
    }
}

fn log_signal(signal: TerminationSignal) {
    error!(signal = %signal, "received unexpected signal; terminating engine process");
}
