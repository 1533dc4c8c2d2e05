//! Pilot: programmatic interaction with a headless style engine.
//!
//! The `Pilot` wraps a [`StyleEngine`] backed by a [`RecordingToolkit`] and
//! provides methods to simulate pointer and drag input, send widget
//! signals, advance time, and inspect what the toolkit was asked to do.

use std::rc::Rc;
use std::time::Duration;

use crate::app::AppConfig;
use crate::css::cascade::ResolvedStyle;
use crate::css::state::State;
use crate::css::stylesheet::Stylesheet;
use crate::dom::NodeId;
use crate::error::Error;
use crate::event::input::InteractionEvent;
use crate::event::signal::WidgetSignal;
use crate::style::{AppliedStyle, StyleEngine, WidgetOptions};
use crate::testing::recorder::RecordingToolkit;
use crate::testing::snapshot::style_tree;

/// Frame length used by [`Pilot::settle`].
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames [`Pilot::settle`] runs before giving up.
const MAX_SETTLE_FRAMES: usize = 10_000;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless engine driver for testing.
///
/// # Examples
///
/// ```
/// use cordial::style::WidgetOptions;
/// use cordial::testing::Pilot;
///
/// let mut pilot = Pilot::new("Button:hover { color: red; }").unwrap();
/// let button = pilot.spawn(WidgetOptions::new("Button")).unwrap();
/// pilot.hover(button).unwrap();
/// assert_eq!(pilot.native(button), "Button { color: red; }");
/// ```
pub struct Pilot {
    engine: StyleEngine<RecordingToolkit>,
}

impl Pilot {
    /// Parse `css` and create an empty engine.
    pub fn new(css: &str) -> Result<Self, Error> {
        let sheet = Stylesheet::parse(css)?;
        Ok(Self::with_stylesheet(Rc::new(sheet)))
    }

    /// Load the stylesheet an [`AppConfig`] points at.
    pub fn with_config(config: &AppConfig) -> Result<Self, Error> {
        Ok(Self::with_stylesheet(Rc::new(config.stylesheet.load()?)))
    }

    pub fn with_stylesheet(stylesheet: Rc<Stylesheet>) -> Self {
        Self {
            engine: StyleEngine::new(stylesheet, RecordingToolkit::new()),
        }
    }

    /// Construct a widget.
    pub fn spawn(&mut self, options: WidgetOptions) -> Result<NodeId, Error> {
        self.engine.create_widget(options)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Pointer enters `node`.
    pub fn hover(&mut self, node: NodeId) -> Result<(), Error> {
        self.engine.handle_interaction(node, InteractionEvent::Enter)
    }

    /// Pointer leaves `node`.
    pub fn leave(&mut self, node: NodeId) -> Result<(), Error> {
        self.engine.handle_interaction(node, InteractionEvent::Leave)
    }

    /// A drag enters `node`.
    pub fn drag_enter(&mut self, node: NodeId) -> Result<(), Error> {
        self.engine.handle_interaction(node, InteractionEvent::DragEnter)
    }

    /// A drag leaves `node`.
    pub fn drag_leave(&mut self, node: NodeId) -> Result<(), Error> {
        self.engine.handle_interaction(node, InteractionEvent::DragLeave)
    }

    /// Deliver a widget signal.
    pub fn signal(&mut self, node: NodeId, signal: WidgetSignal) -> Result<bool, Error> {
        self.engine.handle_signal(node, signal)
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance animations by `total` in steps of `step`. Returns the number
    /// of style re-applications.
    pub fn advance(&mut self, total: Duration, step: Duration) -> usize {
        let mut restyled = 0;
        let mut elapsed = Duration::ZERO;
        while elapsed < total && !step.is_zero() {
            let dt = step.min(total - elapsed);
            restyled += self.engine.tick(dt);
            elapsed += dt;
        }
        restyled
    }

    /// Tick 16ms frames until no animation is running.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.engine.is_animating() && frames < MAX_SETTLE_FRAMES {
            self.engine.tick(FRAME);
            frames += 1;
        }
        frames
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Live state of `node`; empty for unknown widgets.
    pub fn state(&self, node: NodeId) -> State {
        self.engine.state(node).unwrap_or(State::empty())
    }

    /// Last native stylesheet text of `node`; empty for unknown widgets.
    pub fn native(&self, node: NodeId) -> &str {
        self.engine.native_style(node).unwrap_or("")
    }

    pub fn resolved(&self, node: NodeId) -> Option<&ResolvedStyle> {
        self.engine.resolved_style(node)
    }

    pub fn last_applied(&self, node: NodeId) -> Option<&AppliedStyle> {
        self.engine.toolkit().last_for(node)
    }

    pub fn applied_count(&self, node: NodeId) -> usize {
        self.engine.toolkit().count_for(node)
    }

    /// The whole tree rendered by [`style_tree`].
    pub fn dump(&self) -> String {
        style_tree(&self.engine)
    }

    pub fn engine(&self) -> &StyleEngine<RecordingToolkit> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StyleEngine<RecordingToolkit> {
        &mut self.engine
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::state::StatePair;
    use crate::dom::Capabilities;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_rejects_bad_css() {
        assert!(matches!(Pilot::new("Button:focus { color: red; }"), Err(Error::Parse(_))));
    }

    #[test]
    fn with_config_inline() {
        let config = AppConfig::new().with_stylesheet("Label { color: red; }");
        let mut pilot = Pilot::with_config(&config).unwrap();
        let label = pilot.spawn(WidgetOptions::new("Label")).unwrap();
        assert_eq!(pilot.native(label), "Label { color: red; }");
    }

    // ── Input ────────────────────────────────────────────────────────

    #[test]
    fn hover_and_leave() {
        let mut pilot = Pilot::new("").unwrap();
        let node = pilot.spawn(WidgetOptions::new("A")).unwrap();
        pilot.hover(node).unwrap();
        assert!(pilot.state(node).is_on(StatePair::Hover));
        pilot.leave(node).unwrap();
        assert_eq!(pilot.state(node), State::DEFAULT);
    }

    #[test]
    fn drag_hover() {
        let mut pilot = Pilot::new("Folder:draghover { background: white; }").unwrap();
        let folder = pilot.spawn(WidgetOptions::new("Folder")).unwrap();
        pilot.drag_enter(folder).unwrap();
        assert_eq!(pilot.native(folder), "Folder { background: white; }");
        pilot.drag_leave(folder).unwrap();
        assert_eq!(pilot.native(folder), "");
    }

    #[test]
    fn signal_passthrough() {
        let mut pilot = Pilot::new("").unwrap();
        let toggle = pilot
            .spawn(WidgetOptions::new("Switch").capabilities(Capabilities::CHECKABLE))
            .unwrap();
        assert!(pilot.signal(toggle, WidgetSignal::Toggled(true)).unwrap());
        assert!(pilot.state(toggle).is_on(StatePair::Checked));
    }

    // ── Time ─────────────────────────────────────────────────────────

    #[test]
    fn advance_and_settle() {
        let mut pilot = Pilot::new(
            "Pill { margin-top: 0px; transition: margin-top 100ms linear; } \
             Pill:notify { margin-top: 8px; }",
        )
        .unwrap();
        let pill = pilot
            .spawn(WidgetOptions::new("Pill").capabilities(Capabilities::NOTIFIES))
            .unwrap();
        pilot.signal(pill, WidgetSignal::Notify(true)).unwrap();

        assert!(pilot.advance(Duration::from_millis(50), Duration::from_millis(10)) > 0);
        assert_eq!(pilot.last_applied(pill).unwrap().contents_margins.top, 4);

        pilot.settle();
        assert!(!pilot.engine().is_animating());
        assert_eq!(pilot.resolved(pill).unwrap()["margin-top"], "8px");
    }

    // ── Query ────────────────────────────────────────────────────────

    #[test]
    fn unknown_widget_queries() {
        let mut pilot = Pilot::new("").unwrap();
        let node = pilot.spawn(WidgetOptions::new("A")).unwrap();
        pilot.engine_mut().remove_widget(node).unwrap();
        assert_eq!(pilot.state(node), State::empty());
        assert_eq!(pilot.native(node), "");
        assert!(pilot.resolved(node).is_none());
        assert_eq!(pilot.applied_count(node), 1);
    }
}
