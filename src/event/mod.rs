//! Event system: toolkit interaction events, widget signals, cross-thread bridge.

pub mod bridge;
pub mod input;
pub mod signal;

pub use bridge::{signal_channel, SignalReceiver, SignalSender};
pub use input::InteractionEvent;
pub use signal::WidgetSignal;
