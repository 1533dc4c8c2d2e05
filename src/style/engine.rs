//! The style engine: widget construction, state propagation, animation ticks.
//!
//! [`StyleEngine`] is the single entry point outer code constructs widgets
//! through. It owns the widget tree, one [`WidgetStyle`] per widget and the
//! host [`Toolkit`], and shares the immutable [`Stylesheet`] through an `Rc`.
//! Everything runs on the UI thread; nothing here blocks.

use std::rc::Rc;
use std::time::Duration;

use slotmap::SecondaryMap;

use crate::css::cascade::{Cascade, ResolvedStyle, StyleCondition};
use crate::css::expand::{expand, expanded_keys};
use crate::css::matcher::match_rule;
use crate::css::model::UNIVERSAL;
use crate::css::state::{State, StatePair};
use crate::css::stylesheet::Stylesheet;
use crate::dom::{Capabilities, Dom, LayoutKind, NodeData, NodeId};
use crate::error::{ConfigError, Error};
use crate::event::input::InteractionEvent;
use crate::event::signal::WidgetSignal;
use crate::style::apply::apply;
use crate::style::widget_style::WidgetStyle;
use crate::widget::Toolkit;

// ---------------------------------------------------------------------------
// WidgetOptions
// ---------------------------------------------------------------------------

/// Construction options for a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    /// Type name matched by type selectors, e.g. `Button` or `ChatBox.Message`.
    pub type_name: String,
    pub parent: Option<NodeId>,
    /// Object name matched by `#name` selectors.
    pub name: Option<String>,
    pub layout: Option<LayoutKind>,
    pub capabilities: Capabilities,
    /// Keys dropped from the first style application only.
    pub exclude: Vec<String>,
}

impl WidgetOptions {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            parent: None,
            name: None,
            layout: None,
            capabilities: Capabilities::empty(),
            exclude: Vec::new(),
        }
    }

    /// Set the parent widget (builder).
    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the object name (builder).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Host children with `layout` (builder).
    pub fn layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Declare capabilities (builder).
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    /// Skip these keys in the first style application (builder).
    pub fn exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(keys.into_iter().map(Into::into));
        self
    }

    fn node_data(&self) -> NodeData {
        let mut data = NodeData::new(self.type_name.clone()).with_capabilities(self.capabilities);
        data.name = self.name.clone();
        data.layout = self.layout;
        data
    }
}

// ---------------------------------------------------------------------------
// StyleEngine
// ---------------------------------------------------------------------------

/// Owns the widget tree and keeps every widget's toolkit style current.
pub struct StyleEngine<T> {
    stylesheet: Rc<Stylesheet>,
    dom: Dom,
    styles: SecondaryMap<NodeId, WidgetStyle>,
    toolkit: T,
}

impl<T: Toolkit> StyleEngine<T> {
    pub fn new(stylesheet: Rc<Stylesheet>, toolkit: T) -> Self {
        Self {
            stylesheet,
            dom: Dom::new(),
            styles: SecondaryMap::new(),
            toolkit,
        }
    }

    pub fn stylesheet(&self) -> &Rc<Stylesheet> {
        &self.stylesheet
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    /// The full style record of a widget.
    pub fn widget_style(&self, node: NodeId) -> Option<&WidgetStyle> {
        self.styles.get(node)
    }

    /// Live interaction state of a widget.
    pub fn state(&self, node: NodeId) -> Option<State> {
        self.styles.get(node).map(|s| s.state)
    }

    /// Last native stylesheet text applied to a widget.
    pub fn native_style(&self, node: NodeId) -> Option<&str> {
        self.styles.get(node).map(|s| s.native.as_str())
    }

    /// Last resolved (transition-filtered) property map of a widget.
    pub fn resolved_style(&self, node: NodeId) -> Option<&ResolvedStyle> {
        self.styles.get(node).map(|s| &s.resolved)
    }

    // ── Construction ─────────────────────────────────────────────────

    /// Insert a widget, build its cascade and apply its first style.
    ///
    /// Unsupported or conditioned construction-time declarations abort the
    /// construction and leave the tree unchanged.
    pub fn create_widget(&mut self, options: WidgetOptions) -> Result<NodeId, Error> {
        let data = options.node_data();
        let node = match options.parent {
            Some(parent) => self
                .dom
                .insert_child(parent, data.clone())
                .ok_or(Error::UnknownWidget(parent))?,
            None => self.dom.insert(data.clone()),
        };

        let cascade = self.build_cascade(node, options.parent, &data);
        let style = match WidgetStyle::new(cascade, &data) {
            Ok(style) => style,
            Err(err) => {
                self.dom.remove(node);
                tracing::debug!(widget = %data.describe(), %err, "widget construction failed");
                return Err(err.into());
            }
        };
        self.styles.insert(node, style);
        self.toolkit.construct(node, &data, options.parent);
        self.restyle(node, &options.exclude);
        self.register_callbacks(node);
        tracing::debug!(widget = %data.describe(), ?node, "widget created");
        Ok(node)
    }

    /// Inherited keys from the parent, then the `*`, type and `#name` rule
    /// groups in that order.
    fn build_cascade(&self, node: NodeId, parent: Option<NodeId>, data: &NodeData) -> Cascade {
        let mut cascade = parent
            .and_then(|p| self.styles.get(p))
            .map(|s| Cascade::inherit_from(&s.cascade))
            .unwrap_or_default();

        let id_selector = data.name.as_ref().map(|name| format!("#{name}"));
        let groups = [Some(UNIVERSAL), Some(data.widget_type.as_str()), id_selector.as_deref()];
        for group in groups.into_iter().flatten() {
            for rule in self.stylesheet.candidates(group) {
                if let Some(conditions) = match_rule(&self.dom, node, rule) {
                    cascade.push_declarations(&conditions, &rule.declarations);
                }
            }
        }
        cascade
    }

    /// Register `node` with every widget its stateful conditions name.
    fn register_callbacks(&mut self, node: NodeId) {
        let Some(style) = self.styles.get(node) else {
            return;
        };
        for target in style.cascade.dependencies() {
            let Some(target_style) = self.styles.get_mut(target) else {
                continue;
            };
            target_style.callbacks.insert(node);
            if let Some(style) = self.styles.get_mut(node) {
                style.dependencies.insert(target);
            }
        }
    }

    // ── State ────────────────────────────────────────────────────────

    /// Turn a state pair on or off.
    ///
    /// Returns `Ok(false)` without re-styling anything when the requested
    /// half is already set. Otherwise re-styles the widget and every
    /// dependent, each once.
    pub fn toggle(&mut self, node: NodeId, pair: StatePair, on: bool) -> Result<bool, Error> {
        let style = self.styles.get_mut(node).ok_or(Error::UnknownWidget(node))?;
        if !style.state.toggle_pair(pair, on) {
            return Ok(false);
        }
        tracing::trace!(?node, ?pair, on, "state toggled");
        self.propagate(node);
        Ok(true)
    }

    fn propagate(&mut self, node: NodeId) {
        let mut targets = vec![node];
        if let Some(style) = self.styles.get(node) {
            targets.extend(style.callbacks.iter().copied().filter(|&t| t != node));
        }
        tracing::trace!(?node, dependents = targets.len() - 1, "propagating state change");
        for target in targets {
            self.restyle(target, &[]);
        }
    }

    /// Toolkit event filter entry point.
    pub fn handle_interaction(&mut self, node: NodeId, event: InteractionEvent) -> Result<(), Error> {
        for &(pair, on) in event.toggles() {
            self.toggle(node, pair, on)?;
        }
        Ok(())
    }

    /// Apply an optional widget signal. Widgets that do not declare the
    /// matching capability ignore it (`Ok(false)`).
    pub fn handle_signal(&mut self, node: NodeId, signal: WidgetSignal) -> Result<bool, Error> {
        let data = self.dom.get(node).ok_or(Error::UnknownWidget(node))?;
        if !data.supports(signal.required_capability()) {
            tracing::trace!(widget = %data.describe(), ?signal, "signal not supported, ignored");
            return Ok(false);
        }
        self.toggle(node, signal.pair(), signal.is_on())
    }

    // ── Ad-hoc declarations ──────────────────────────────────────────

    /// Install a declaration on one widget, active while the widget's own
    /// state contains `state` (always, for an empty state).
    ///
    /// An empty value clears the property instead.
    pub fn style(&mut self, node: NodeId, key: &str, value: &str, state: State) -> Result<(), Error> {
        let value = value.trim();
        if value.is_empty() {
            return self.clear_style(node, key);
        }
        let style = self.styles.get_mut(node).ok_or(Error::UnknownWidget(node))?;
        let declarations = expand(key, value);
        for (key, value) in &declarations {
            if let Some(kind) = style.animations.kind_of(key) {
                kind.parse_value(value).map_err(|source| ConfigError::InvalidValue {
                    property: key.clone(),
                    value: value.clone(),
                    source,
                })?;
            }
        }
        style
            .cascade
            .push_declarations(&[StyleCondition::new(node, state)], &declarations);

        if !state.is_empty() {
            self.register_callbacks(node);
        }
        self.restyle(node, &[]);
        Ok(())
    }

    /// Remove every longhand key `key` expands to.
    pub fn clear_style(&mut self, node: NodeId, key: &str) -> Result<(), Error> {
        let style = self.styles.get_mut(node).ok_or(Error::UnknownWidget(node))?;
        let mut removed = false;
        for longhand in expanded_keys(key) {
            removed |= style.cascade.remove(&longhand);
        }
        if removed {
            self.restyle(node, &[]);
        }
        Ok(())
    }

    // ── Removal ──────────────────────────────────────────────────────

    /// Remove a widget and its descendants.
    ///
    /// Surviving widgets lose every condition naming a removed widget and
    /// are re-styled. Returns the removed ids.
    pub fn remove_widget(&mut self, node: NodeId) -> Result<Vec<NodeId>, Error> {
        if !self.dom.contains(node) {
            return Err(Error::UnknownWidget(node));
        }
        let removed = self.dom.remove(node);

        let mut dependents = Vec::new();
        for &gone in &removed {
            let Some(style) = self.styles.remove(gone) else {
                continue;
            };
            for dependency in &style.dependencies {
                if let Some(target) = self.styles.get_mut(*dependency) {
                    target.callbacks.remove(&gone);
                }
            }
            for &dependent in &style.callbacks {
                if !removed.contains(&dependent) && !dependents.contains(&dependent) {
                    dependents.push(dependent);
                }
            }
            self.toolkit.destroy(gone);
        }

        for &dependent in &dependents {
            if let Some(style) = self.styles.get_mut(dependent) {
                for &gone in &removed {
                    style.cascade.prune(gone);
                    style.dependencies.remove(&gone);
                }
            }
            self.restyle(dependent, &[]);
        }

        tracing::debug!(?node, removed = removed.len(), dependents = dependents.len(), "widget removed");
        Ok(removed)
    }

    // ── Animation ────────────────────────────────────────────────────

    /// Advance every running transition by `dt` and re-apply the widgets
    /// whose animated values moved. Returns how many were re-applied.
    pub fn tick(&mut self, dt: Duration) -> usize {
        let moved: Vec<NodeId> = self
            .styles
            .iter_mut()
            .filter_map(|(node, style)| style.animations.tick(dt).then_some(node))
            .collect();
        for &node in &moved {
            self.restyle(node, &[]);
        }
        moved.len()
    }

    /// Whether any transition is still running.
    pub fn is_animating(&self) -> bool {
        self.styles.values().any(|s| s.animations.is_running())
    }

    // ── Application ──────────────────────────────────────────────────

    /// Resolve, filter through transitions, and hand to the toolkit.
    fn restyle(&mut self, node: NodeId, exclude: &[String]) {
        let Some(data) = self.dom.get(node) else {
            return;
        };
        let Some(style) = self.styles.get(node) else {
            return;
        };
        let styles = &self.styles;
        let mut resolved = style.cascade.resolve(|id| styles.get(id).map(|s| s.state));

        let Some(style) = self.styles.get_mut(node) else {
            return;
        };
        style.animations.filter(&mut resolved);
        for key in exclude {
            resolved.remove(key);
        }

        let applied = apply(node, data, &style.attributes, &resolved);
        style.resolved = resolved;
        style.native.clone_from(&applied.native);
        tracing::trace!(widget = %data.describe(), native = %applied.native, "style applied");
        self.toolkit.apply_style(&applied);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingToolkit;
    use pretty_assertions::assert_eq;

    fn engine(css: &str) -> StyleEngine<RecordingToolkit> {
        let sheet = Stylesheet::parse(css).unwrap();
        StyleEngine::new(Rc::new(sheet), RecordingToolkit::new())
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn rule_groups_apply_in_fixed_order() {
        let mut engine = engine("#send { color: red; } Button { color: green; } * { color: blue; }");
        let send = engine.create_widget(WidgetOptions::new("Button").name("send")).unwrap();
        let other = engine.create_widget(WidgetOptions::new("Button")).unwrap();
        let label = engine.create_widget(WidgetOptions::new("Label")).unwrap();
        assert_eq!(engine.native_style(send), Some("Button { color: red; }"));
        assert_eq!(engine.native_style(other), Some("Button { color: green; }"));
        assert_eq!(engine.native_style(label), Some("Label { color: blue; }"));
    }

    #[test]
    fn last_declared_wins_within_group() {
        let mut engine = engine("Button { color: red; } Button { color: blue; }");
        let button = engine.create_widget(WidgetOptions::new("Button")).unwrap();
        assert_eq!(engine.resolved_style(button).unwrap()["color"], "blue");
    }

    #[test]
    fn inherited_keys_flow_to_children() {
        let mut engine = engine(
            "Sidebar { color: white; font-size: 14px; background: black; } \
             Sidebar Label { color: gray; }",
        );
        let sidebar = engine.create_widget(WidgetOptions::new("Sidebar")).unwrap();
        let icon = engine
            .create_widget(WidgetOptions::new("Icon").parent(sidebar))
            .unwrap();
        let label = engine
            .create_widget(WidgetOptions::new("Label").parent(sidebar))
            .unwrap();
        assert_eq!(
            engine.native_style(icon),
            Some("Icon { color: white; font-size: 14px; }")
        );
        assert_eq!(
            engine.native_style(label),
            Some("Label { color: gray; font-size: 14px; }")
        );
    }

    #[test]
    fn stateful_parent_does_not_beat_own_rule() {
        let mut engine = engine("Sidebar:hover { color: red; } Label { color: gray; }");
        let sidebar = engine.create_widget(WidgetOptions::new("Sidebar")).unwrap();
        let label = engine
            .create_widget(WidgetOptions::new("Label").parent(sidebar))
            .unwrap();
        assert_eq!(engine.native_style(label), Some("Label { color: gray; }"));

        engine.toggle(sidebar, StatePair::Hover, true).unwrap();
        assert_eq!(engine.native_style(sidebar), Some("Sidebar { color: red; }"));
        assert_eq!(engine.native_style(label), Some("Label { color: gray; }"));
    }

    #[test]
    fn first_application_honors_exclude() {
        let mut engine = engine("Dropdown { rotate: 90; color: red; } Dropdown:hover { color: blue; }");
        let dropdown = engine
            .create_widget(WidgetOptions::new("Dropdown").exclude(["rotate"]))
            .unwrap();
        assert_eq!(engine.native_style(dropdown), Some("Dropdown { color: red; }"));

        engine.toggle(dropdown, StatePair::Hover, true).unwrap();
        assert_eq!(
            engine.native_style(dropdown),
            Some("Dropdown { color: blue; rotate: 90; }")
        );
    }

    #[test]
    fn config_error_leaves_tree_unchanged() {
        let mut engine = engine("Button { transition: width 1s linear; }");
        let err = engine.create_widget(WidgetOptions::new("Button")).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnsupportedTransitionProperty(ref p)) if p == "width"
        ));
        assert!(engine.dom().is_empty());
        assert!(engine.toolkit().applied.is_empty());
    }

    #[test]
    fn unknown_parent() {
        let mut engine = engine("");
        let gone = engine.create_widget(WidgetOptions::new("A")).unwrap();
        engine.remove_widget(gone).unwrap();
        assert!(matches!(
            engine.create_widget(WidgetOptions::new("B").parent(gone)),
            Err(Error::UnknownWidget(id)) if id == gone
        ));
    }

    // ── State ────────────────────────────────────────────────────────

    #[test]
    fn toggle_is_idempotent_and_propagates_once() {
        let mut engine = engine("Button:checked { color: red; }");
        let button = engine
            .create_widget(WidgetOptions::new("Button").capabilities(Capabilities::CHECKABLE))
            .unwrap();
        let before = engine.toolkit().count_for(button);

        assert!(engine.toggle(button, StatePair::Checked, true).unwrap());
        let state = engine.state(button);
        assert!(!engine.toggle(button, StatePair::Checked, true).unwrap());

        assert_eq!(engine.state(button), state);
        assert_eq!(engine.toolkit().count_for(button), before + 1);
    }

    #[test]
    fn hover_scenario() {
        let mut engine = engine("Button:hover { color: red; } Button { color: blue; }");
        let button = engine.create_widget(WidgetOptions::new("Button")).unwrap();
        assert_eq!(engine.resolved_style(button).unwrap()["color"], "blue");

        engine.handle_interaction(button, InteractionEvent::Enter).unwrap();
        assert_eq!(engine.resolved_style(button).unwrap()["color"], "red");

        engine.handle_interaction(button, InteractionEvent::Leave).unwrap();
        assert_eq!(engine.resolved_style(button).unwrap()["color"], "blue");
    }

    #[test]
    fn ancestor_state_restyles_descendant() {
        let mut engine = engine("Guild:hover Pill { opacity: 1; } Pill { opacity: 0.5; }");
        let guild = engine.create_widget(WidgetOptions::new("Guild")).unwrap();
        let pill = engine
            .create_widget(WidgetOptions::new("Pill").parent(guild))
            .unwrap();
        assert_eq!(engine.toolkit().last_for(pill).unwrap().opacity, Some(0.5));

        engine.toggle(guild, StatePair::Hover, true).unwrap();
        assert_eq!(engine.toolkit().last_for(pill).unwrap().opacity, Some(1.0));
        assert!(engine.widget_style(guild).unwrap().callbacks.contains(&pill));
        assert!(engine.widget_style(pill).unwrap().dependencies.contains(&guild));
    }

    #[test]
    fn enter_ends_drag_hover() {
        let mut engine = engine("");
        let guild = engine.create_widget(WidgetOptions::new("Guild")).unwrap();
        engine.handle_interaction(guild, InteractionEvent::DragEnter).unwrap();
        assert!(engine.state(guild).unwrap().is_on(StatePair::DragHover));
        engine.handle_interaction(guild, InteractionEvent::Enter).unwrap();
        let state = engine.state(guild).unwrap();
        assert!(state.is_on(StatePair::Hover));
        assert!(!state.is_on(StatePair::DragHover));
    }

    #[test]
    fn signal_requires_capability() {
        let mut engine = engine("");
        let plain = engine.create_widget(WidgetOptions::new("Label")).unwrap();
        let guild = engine
            .create_widget(WidgetOptions::new("Guild").capabilities(Capabilities::DRAGGABLE))
            .unwrap();
        assert!(!engine.handle_signal(plain, WidgetSignal::Dragged(true)).unwrap());
        assert_eq!(engine.state(plain), Some(State::DEFAULT));
        assert!(engine.handle_signal(guild, WidgetSignal::Dragged(true)).unwrap());
        assert!(engine.state(guild).unwrap().is_on(StatePair::Dragged));
    }

    // ── Ad-hoc declarations ──────────────────────────────────────────

    #[test]
    fn adhoc_style_with_state() {
        let mut engine = engine("Button { background: gray; }");
        let button = engine.create_widget(WidgetOptions::new("Button")).unwrap();
        engine.style(button, "background", "white", State::HOVER).unwrap();
        assert_eq!(engine.resolved_style(button).unwrap()["background"], "gray");

        engine.toggle(button, StatePair::Hover, true).unwrap();
        assert_eq!(engine.resolved_style(button).unwrap()["background"], "white");
        assert!(engine.widget_style(button).unwrap().callbacks.contains(&button));
    }

    #[test]
    fn adhoc_style_expands_and_clears() {
        let mut engine = engine("");
        let panel = engine.create_widget(WidgetOptions::new("Panel")).unwrap();
        engine.style(panel, "margin", "4px 8px", State::empty()).unwrap();
        assert_eq!(
            engine.toolkit().last_for(panel).unwrap().contents_margins,
            crate::geometry::Spacing::new(4, 8, 4, 8)
        );

        engine.clear_style(panel, "margin").unwrap();
        assert_eq!(engine.native_style(panel), Some(""));

        engine.style(panel, "color", "red", State::empty()).unwrap();
        engine.style(panel, "color", "", State::empty()).unwrap();
        assert!(engine.resolved_style(panel).unwrap().is_empty());
    }

    #[test]
    fn adhoc_animated_value_is_validated() {
        let mut engine = engine("Button { transition: color 100ms linear; color: #000; }");
        let button = engine.create_widget(WidgetOptions::new("Button")).unwrap();
        assert!(matches!(
            engine.style(button, "color", "reddish", State::empty()),
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn unknown_widget_errors() {
        let mut engine = engine("");
        let node = engine.create_widget(WidgetOptions::new("A")).unwrap();
        engine.remove_widget(node).unwrap();
        assert!(matches!(engine.toggle(node, StatePair::Hover, true), Err(Error::UnknownWidget(_))));
        assert!(matches!(engine.style(node, "a", "b", State::empty()), Err(Error::UnknownWidget(_))));
        assert!(matches!(engine.remove_widget(node), Err(Error::UnknownWidget(_))));
        assert_eq!(engine.native_style(node), None);
    }

    // ── Removal ──────────────────────────────────────────────────────

    #[test]
    fn removal_prunes_dependents() {
        let mut engine = engine("Window:has(Badge:notify) #title { color: red; }");
        let window = engine.create_widget(WidgetOptions::new("Window")).unwrap();
        let badge = engine
            .create_widget(
                WidgetOptions::new("Badge")
                    .parent(window)
                    .capabilities(Capabilities::NOTIFIES),
            )
            .unwrap();
        let title = engine
            .create_widget(WidgetOptions::new("Label").parent(window).name("title"))
            .unwrap();

        engine.handle_signal(badge, WidgetSignal::Notify(true)).unwrap();
        assert_eq!(engine.native_style(title), Some("Label { color: red; }"));

        let removed = engine.remove_widget(badge).unwrap();
        assert_eq!(removed, vec![badge]);
        assert_eq!(engine.native_style(title), Some(""));
        let title_style = engine.widget_style(title).unwrap();
        assert!(title_style.cascade.is_empty());
        assert!(title_style.dependencies.is_empty());
        assert_eq!(engine.toolkit().destroyed, vec![badge]);
    }

    #[test]
    fn removing_a_dependent_unregisters_it() {
        let mut engine = engine("Guild:hover Pill { opacity: 1; }");
        let guild = engine.create_widget(WidgetOptions::new("Guild")).unwrap();
        let pill = engine
            .create_widget(WidgetOptions::new("Pill").parent(guild))
            .unwrap();
        engine.remove_widget(pill).unwrap();
        assert!(engine.widget_style(guild).unwrap().callbacks.is_empty());
        // Toggling afterwards touches only the guild.
        engine.toolkit_mut().clear();
        engine.toggle(guild, StatePair::Hover, true).unwrap();
        assert_eq!(engine.toolkit().applied.len(), 1);
    }

    // ── Animation ────────────────────────────────────────────────────

    #[test]
    fn transition_animates_to_target() {
        let mut engine = engine(
            "Button { background: #000000; transition: background 100ms linear; } \
             Button:hover { background: #ffffff; }",
        );
        let button = engine.create_widget(WidgetOptions::new("Button")).unwrap();
        assert_eq!(engine.native_style(button), Some("Button { background: rgb(0, 0, 0); }"));
        assert!(engine.toolkit().last_for(button).unwrap().attributes.styled_background);

        engine.toggle(button, StatePair::Hover, true).unwrap();
        assert!(engine.is_animating());
        assert_eq!(engine.native_style(button), Some("Button { background: rgb(0, 0, 0); }"));

        assert_eq!(engine.tick(Duration::from_millis(100)), 1);
        assert_eq!(
            engine.native_style(button),
            Some("Button { background: rgb(255, 255, 255); }")
        );
        assert!(!engine.is_animating());
        assert_eq!(engine.tick(Duration::from_millis(16)), 0);
    }
}
