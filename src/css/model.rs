//! Stylesheet AST: Selector, StylesheetRule.

use crate::css::state::State;

/// Name of the universal selector.
pub const UNIVERSAL: &str = "*";

/// A single compound selector token, e.g. `Button:hover` or `#send:has(> Icon)`.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// `*`, a widget type name, or `#` followed by a widget name.
    pub name: String,
    /// Required interaction state (empty when no pseudo-class was given).
    pub state: State,
    /// Structural `:has(...)` constraint on the matched widget's descendants.
    pub has: Option<Box<Selector>>,
    /// Whether this token was preceded by `>`.
    pub is_direct_descendant: bool,
}

impl Selector {
    /// A plain selector with no state and no structural constraint.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: State::empty(),
            has: None,
            is_direct_descendant: false,
        }
    }

    /// Add a required state (builder).
    pub fn with_state(mut self, state: State) -> Self {
        self.state |= state;
        self
    }

    /// Attach a `:has(...)` constraint (builder).
    pub fn with_has(mut self, inner: Selector) -> Self {
        self.has = Some(Box::new(inner));
        self
    }

    /// Mark as a direct descendant (builder).
    pub fn direct(mut self) -> Self {
        self.is_direct_descendant = true;
        self
    }

    /// Whether this selector's name matches a widget with the given type and name.
    pub fn matches_name(&self, widget_type: &str, widget_name: Option<&str>) -> bool {
        if self.name == UNIVERSAL || self.name == widget_type {
            return true;
        }
        match (self.name.strip_prefix('#'), widget_name) {
            (Some(id), Some(name)) => id == name,
            _ => false,
        }
    }
}

/// One selector chain paired with its (already expanded) declarations.
///
/// A comma-separated selector list produces one rule per chain.
#[derive(Debug, Clone, PartialEq)]
pub struct StylesheetRule {
    /// Ancestor-to-subject order. Never empty.
    pub selectors: Vec<Selector>,
    /// Property name and raw value, in declaration order.
    pub declarations: Vec<(String, String)>,
}

impl StylesheetRule {
    /// The rightmost selector.
    pub fn subject(&self) -> &Selector {
        &self.selectors[self.selectors.len() - 1]
    }
}
