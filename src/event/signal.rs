//! Optional widget signals and the capability each one requires.

use crate::css::state::StatePair;
use crate::dom::Capabilities;

/// A state-change notification emitted by a widget (or on its behalf by the
/// application's domain layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetSignal {
    /// Toggle button checked or unchecked.
    Toggled(bool),
    /// Widget started or stopped being dragged.
    Dragged(bool),
    /// Unread indicator on or off.
    Notify(bool),
    /// Became or stopped being the current selection.
    Active(bool),
}

impl WidgetSignal {
    pub fn pair(self) -> StatePair {
        match self {
            WidgetSignal::Toggled(_) => StatePair::Checked,
            WidgetSignal::Dragged(_) => StatePair::Dragged,
            WidgetSignal::Notify(_) => StatePair::Notify,
            WidgetSignal::Active(_) => StatePair::Active,
        }
    }

    pub fn is_on(self) -> bool {
        match self {
            WidgetSignal::Toggled(on)
            | WidgetSignal::Dragged(on)
            | WidgetSignal::Notify(on)
            | WidgetSignal::Active(on) => on,
        }
    }

    /// Capability a widget must declare for this signal to be honored.
    pub fn required_capability(self) -> Capabilities {
        match self {
            WidgetSignal::Toggled(_) => Capabilities::CHECKABLE,
            WidgetSignal::Dragged(_) => Capabilities::DRAGGABLE,
            WidgetSignal::Notify(_) => Capabilities::NOTIFIES,
            WidgetSignal::Active(_) => Capabilities::ACTIVATABLE,
        }
    }
}
