//! A toolkit that records every call instead of driving real widgets.

use crate::dom::{NodeData, NodeId};
use crate::style::apply::AppliedStyle;
use crate::widget::Toolkit;

/// Headless [`Toolkit`] that keeps a log of construct/apply/destroy calls.
#[derive(Debug, Default)]
pub struct RecordingToolkit {
    /// Constructed widgets with their type names, in order.
    pub constructed: Vec<(NodeId, String)>,
    /// Every applied style, in order.
    pub applied: Vec<AppliedStyle>,
    /// Destroyed widgets, in order.
    pub destroyed: Vec<NodeId>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Styles applied to `node`, oldest first.
    pub fn applied_to(&self, node: NodeId) -> impl Iterator<Item = &AppliedStyle> {
        self.applied.iter().filter(move |a| a.node == node)
    }

    /// Number of style applications to `node`.
    pub fn count_for(&self, node: NodeId) -> usize {
        self.applied_to(node).count()
    }

    /// The most recent style applied to `node`.
    pub fn last_for(&self, node: NodeId) -> Option<&AppliedStyle> {
        self.applied.iter().rev().find(|a| a.node == node)
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.constructed.clear();
        self.applied.clear();
        self.destroyed.clear();
    }
}

impl Toolkit for RecordingToolkit {
    fn construct(&mut self, node: NodeId, data: &NodeData, _parent: Option<NodeId>) {
        self.constructed.push((node, data.widget_type.clone()));
    }

    fn apply_style(&mut self, style: &AppliedStyle) {
        self.applied.push(style.clone());
    }

    fn destroy(&mut self, node: NodeId) {
        self.destroyed.push(node);
    }
}
