//! Interaction state masks: paired on/off bits per pseudo-class.
//!
//! Every widget carries a [`State`] in which exactly one bit of each pair is
//! set. Selectors carry a (possibly partial) [`State`] as their requirement;
//! a requirement holds when all of its bits are set in the widget's state.

use bitflags::bitflags;

bitflags! {
    /// Bitset over the six toggleable interaction states.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct State: u16 {
        const HOVER       = 1 << 0;
        const UNHOVER     = 1 << 1;
        const CHECKED     = 1 << 2;
        const UNCHECKED   = 1 << 3;
        const DRAGGED     = 1 << 4;
        const UNDRAGGED   = 1 << 5;
        const DRAGHOVER   = 1 << 6;
        const UNDRAGHOVER = 1 << 7;
        const NOTIFY      = 1 << 8;
        const UNNOTIFY    = 1 << 9;
        const ACTIVE      = 1 << 10;
        const UNACTIVE    = 1 << 11;

        /// Live state of a freshly constructed widget: every "un" bit.
        const DEFAULT = Self::UNHOVER.bits()
            | Self::UNCHECKED.bits()
            | Self::UNDRAGGED.bits()
            | Self::UNDRAGHOVER.bits()
            | Self::UNNOTIFY.bits()
            | Self::UNACTIVE.bits();
    }
}

impl Default for State {
    fn default() -> Self {
        State::DEFAULT
    }
}

/// One toggleable on/off pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatePair {
    /// Pointer enter/leave.
    Hover,
    /// Toggle-button state.
    Checked,
    /// Drag source active.
    Dragged,
    /// Drag target hover.
    DragHover,
    /// Unread indicator.
    Notify,
    /// Current-selection indicator.
    Active,
}

impl StatePair {
    /// All pairs, in bit order.
    pub const ALL: [StatePair; 6] = [
        StatePair::Hover,
        StatePair::Checked,
        StatePair::Dragged,
        StatePair::DragHover,
        StatePair::Notify,
        StatePair::Active,
    ];

    /// The "on" half of the pair.
    pub fn on(self) -> State {
        match self {
            StatePair::Hover => State::HOVER,
            StatePair::Checked => State::CHECKED,
            StatePair::Dragged => State::DRAGGED,
            StatePair::DragHover => State::DRAGHOVER,
            StatePair::Notify => State::NOTIFY,
            StatePair::Active => State::ACTIVE,
        }
    }

    /// The "off" half of the pair.
    pub fn off(self) -> State {
        match self {
            StatePair::Hover => State::UNHOVER,
            StatePair::Checked => State::UNCHECKED,
            StatePair::Dragged => State::UNDRAGGED,
            StatePair::DragHover => State::UNDRAGHOVER,
            StatePair::Notify => State::UNNOTIFY,
            StatePair::Active => State::UNACTIVE,
        }
    }

    /// Both halves.
    pub fn both(self) -> State {
        self.on() | self.off()
    }

    /// Select the on or off half.
    pub fn half(self, on: bool) -> State {
        if on {
            self.on()
        } else {
            self.off()
        }
    }
}

impl State {
    /// Look up the state bit named by a pseudo-class (without the leading `:`).
    pub fn from_pseudo_class(name: &str) -> Option<State> {
        let state = match name.to_ascii_lowercase().as_str() {
            "hover" => State::HOVER,
            "unhover" => State::UNHOVER,
            "checked" => State::CHECKED,
            "unchecked" => State::UNCHECKED,
            "dragged" => State::DRAGGED,
            "undragged" => State::UNDRAGGED,
            "draghover" | "drag-hover" => State::DRAGHOVER,
            "undraghover" | "undrag-hover" => State::UNDRAGHOVER,
            "notify" => State::NOTIFY,
            "unnotify" => State::UNNOTIFY,
            "active" => State::ACTIVE,
            "unactive" => State::UNACTIVE,
            _ => return None,
        };
        Some(state)
    }

    /// Turn a pair on or off.
    ///
    /// Returns `false` without touching the mask when the requested half is
    /// already set; otherwise flips both bits and returns `true`.
    pub fn toggle_pair(&mut self, pair: StatePair, on: bool) -> bool {
        if self.contains(pair.half(on)) {
            return false;
        }
        self.toggle_bits(pair.both());
        true
    }

    fn toggle_bits(&mut self, bits: State) {
        *self ^= bits;
    }

    /// Whether the "on" half of `pair` is set.
    pub fn is_on(self, pair: StatePair) -> bool {
        self.contains(pair.on())
    }

    /// Whether this requirement is satisfied by the live state `live`.
    #[inline]
    pub fn holds_in(self, live: State) -> bool {
        live.contains(self)
    }
}
