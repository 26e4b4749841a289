// src/supervise/signals.rs

//! Termination signal sources.
//!
//! The supervisor never inspects the platform itself. It is handed an
//! optional [`TerminationSignals`] source: [`platform`] returns one on unix
//! (SIGINT, SIGQUIT, SIGTERM) and `None` elsewhere, in which case the
//! launcher simply dies with whatever the OS does to it. Tests drive the
//! supervisor with a channel-backed fake.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::supervise::TerminationSignal;

/// Source of termination requests.
pub trait TerminationSignals: Send {
    /// Wait for the next signal.
    ///
    /// `None` means the source is exhausted and will never fire again.
    fn recv(&mut self) -> Pin<Box<dyn Future<Output = Option<TerminationSignal>> + Send + '_>>;
}

/// Install the platform's signal handlers, if it has any.
///
/// Must run inside a Tokio runtime.
pub fn platform() -> Result<Option<Box<dyn TerminationSignals>>> {
    #[cfg(unix)]
    {
        let signals: Box<dyn TerminationSignals> = Box::new(unix::UnixSignals::install()?);
        Ok(Some(signals))
    }

    #[cfg(not(unix))]
    {
        Ok(None)
    }
}

#[cfg(unix)]
pub mod unix {
    use std::future::Future;
    use std::pin::Pin;

    use tokio::signal::unix::{signal, Signal, SignalKind};
    use tracing::debug;

    use super::TerminationSignals;
    use crate::errors::{LauncherError, Result};
    use crate::supervise::TerminationSignal;

    /// SIGINT, SIGQUIT and SIGTERM via Tokio's signal driver.
    ///
    /// Installing replaces the default disposition for the rest of the
    /// process, so the launcher is no longer killed outright by them.
    #[derive(Debug)]
    pub struct UnixSignals {
        interrupt: Signal,
        quit: Signal,
        terminate: Signal,
    }

    impl UnixSignals {
        pub fn install() -> Result<Self> {
            let listen = |kind: SignalKind, name: &str| {
                signal(kind).map_err(|e| {
                    LauncherError::Signal(format!("installing {name} handler: {e}"))
                })
            };

            let handlers = Self {
                interrupt: listen(SignalKind::interrupt(), "SIGINT")?,
                quit: listen(SignalKind::quit(), "SIGQUIT")?,
                terminate: listen(SignalKind::terminate(), "SIGTERM")?,
            };
            debug!("installed SIGINT/SIGQUIT/SIGTERM handlers");
            Ok(handlers)
        }
    }

    impl TerminationSignals for UnixSignals {
        fn recv(
            &mut self,
        ) -> Pin<Box<dyn Future<Output = Option<TerminationSignal>> + Send + '_>> {
            Box::pin(async move {
                tokio::select! {
                    Some(()) = self.interrupt.recv() => Some(TerminationSignal::Interrupt),
                    Some(()) = self.quit.recv() => Some(TerminationSignal::Quit),
                    Some(()) = self.terminate.recv() => Some(TerminationSignal::Terminate),
                    else => None,
                }
            })
        }
    }
}
