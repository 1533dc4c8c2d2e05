//! Node types: NodeId, NodeData, Capabilities, LayoutKind.

use bitflags::bitflags;
use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a widget. Copy, lightweight (u64).
    ///
    /// Stale ids never alias a new widget, so style conditions can hold them
    /// without owning the widget.
    pub struct NodeId;
}

bitflags! {
    /// Optional interfaces a widget declares at construction.
    ///
    /// Signals and style handlers that need one of these are ignored for
    /// widgets that do not declare it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Emits toggled signals (checked/unchecked).
        const CHECKABLE   = 1 << 0;
        /// Emits dragged signals.
        const DRAGGABLE   = 1 << 1;
        /// Emits unread-indicator signals.
        const NOTIFIES    = 1 << 2;
        /// Emits current-selection signals.
        const ACTIVATABLE = 1 << 3;
        /// Vector icon recolored through a colorize effect.
        const COLORIZABLE = 1 << 4;
        /// Can be rotated (`rotate` property).
        const ROTATABLE   = 1 << 5;
    }
}

/// Layout a widget hosts its children with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Vertical,
    Horizontal,
    Grid,
}

/// Data associated with a single widget.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Widget type name used by type selectors (e.g. "Button", "ChatBox.Message").
    pub widget_type: String,
    /// Optional object name, matched by `#name` selectors.
    pub name: Option<String>,
    /// Declared optional interfaces.
    pub capabilities: Capabilities,
    /// Layout hosting the widget's children, if any.
    pub layout: Option<LayoutKind>,
}

impl NodeData {
    /// Create a new `NodeData` with the given widget type and no extras.
    pub fn new(widget_type: impl Into<String>) -> Self {
        Self {
            widget_type: widget_type.into(),
            name: None,
            capabilities: Capabilities::empty(),
            layout: None,
        }
    }

    /// Set the object name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare capabilities (builder).
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    /// Set the layout (builder).
    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Whether the widget declares all of `capabilities`.
    pub fn supports(&self, capabilities: Capabilities) -> bool {
        self.capabilities.contains(capabilities)
    }

    /// The last segment of a qualified type name (`ChatBox.Message` → `Message`).
    pub fn short_type(&self) -> &str {
        self.widget_type
            .rsplit('.')
            .next()
            .unwrap_or(&self.widget_type)
    }

    /// A short label for logs and error messages.
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{}#{name}", self.widget_type),
            None => self.widget_type.clone(),
        }
    }
}
