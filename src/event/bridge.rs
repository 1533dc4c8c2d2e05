//! Cross-thread signal bridge.
//!
//! Domain code running off the UI thread (the network client) sends
//! [`WidgetSignal`]s through a [`SignalSender`]. The UI thread drains them
//! with [`SignalReceiver::drain_into`] once per frame, or awaits them with
//! [`SignalReceiver::recv`] inside the app loop. Style data itself is only
//! ever touched on the UI thread.

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::dom::NodeId;
use crate::error::Error;
use crate::event::signal::WidgetSignal;
use crate::style::StyleEngine;
use crate::widget::Toolkit;

/// Create a connected sender/receiver pair.
pub fn signal_channel() -> (SignalSender, SignalReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        SignalSender { tx },
        SignalReceiver { rx, closed: false },
    )
}

/// Sending half. Cheap to clone, usable from any thread.
#[derive(Debug, Clone)]
pub struct SignalSender {
    tx: mpsc::UnboundedSender<(NodeId, WidgetSignal)>,
}

impl SignalSender {
    /// Queue a signal for `node`. Fails once the receiver is gone.
    pub fn send(&self, node: NodeId, signal: WidgetSignal) -> Result<(), Error> {
        self.tx
            .send((node, signal))
            .map_err(|_| Error::Disconnected)
    }
}

/// Receiving half, owned by the UI thread.
#[derive(Debug)]
pub struct SignalReceiver {
    rx: mpsc::UnboundedReceiver<(NodeId, WidgetSignal)>,
    closed: bool,
}

impl SignalReceiver {
    /// Dispatch every queued signal without blocking. Returns how many were
    /// handled.
    pub fn drain_into<T: Toolkit>(&mut self, engine: &mut StyleEngine<T>) -> usize {
        let mut handled = 0;
        loop {
            match self.rx.try_recv() {
                Ok((node, signal)) => {
                    dispatch(engine, node, signal);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        handled
    }

    /// Wait for the next signal. `None` once every sender is dropped and
    /// the queue is empty.
    pub async fn recv(&mut self) -> Option<(NodeId, WidgetSignal)> {
        let next = self.rx.recv().await;
        if next.is_none() {
            self.closed = true;
        }
        next
    }

    /// Whether the channel was observed closed and empty.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Hand one signal to the engine. Signals for widgets removed in the
/// meantime are dropped.
pub(crate) fn dispatch<T: Toolkit>(engine: &mut StyleEngine<T>, node: NodeId, signal: WidgetSignal) {
    if let Err(err) = engine.handle_signal(node, signal) {
        tracing::debug!(?node, ?signal, %err, "dropping signal");
    }
}
