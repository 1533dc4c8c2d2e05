//! Pointer and drag events forwarded from the toolkit's event filter.

use crate::css::state::StatePair;

/// Low-level interaction event on a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionEvent {
    /// Pointer entered the widget.
    Enter,
    /// Pointer left the widget.
    Leave,
    /// A drag entered the widget.
    DragEnter,
    /// A drag left the widget.
    DragLeave,
}

impl InteractionEvent {
    /// The state toggles this event causes, in order.
    ///
    /// `Enter` also ends a drag hover: a drop or cancelled drag leaves the
    /// pointer over the widget without a `DragLeave`.
    pub fn toggles(self) -> &'static [(StatePair, bool)] {
        match self {
            InteractionEvent::Enter => &[(StatePair::Hover, true), (StatePair::DragHover, false)],
            InteractionEvent::Leave => &[(StatePair::Hover, false)],
            InteractionEvent::DragEnter => &[(StatePair::DragHover, true)],
            InteractionEvent::DragLeave => &[(StatePair::DragHover, false)],
        }
    }
}
