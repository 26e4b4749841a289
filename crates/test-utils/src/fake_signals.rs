use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use dxlaunch::supervise::{TerminationSignal, TerminationSignals};

/// Channel-driven signal source.
///
/// Tests keep the returned sender and "deliver" signals by sending on it.
/// Dropping the sender exhausts the source.
pub struct FakeSignals {
    rx: mpsc::UnboundedReceiver<TerminationSignal>,
}

impl FakeSignals {
    pub fn new() -> (Self, mpsc::UnboundedSender<TerminationSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, tx)
    }

    /// Boxed for `Supervisor::new` / `dxlaunch::launch`.
    pub fn boxed() -> (
        Option<Box<dyn TerminationSignals>>,
        mpsc::UnboundedSender<TerminationSignal>,
    ) {
        let (signals, tx) = Self::new();
        let signals: Box<dyn TerminationSignals> = Box::new(signals);
        (Some(signals), tx)
    }
}

impl TerminationSignals for FakeSignals {
    fn recv(&mut self) -> Pin<Box<dyn Future<Output = Option<TerminationSignal>> + Send + '_>> {
        Box::pin(self.rx.recv())
    }
}
