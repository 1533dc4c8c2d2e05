//! The `Toolkit` trait: what the engine needs from the host widget library.

use crate::dom::{NodeData, NodeId};
use crate::style::apply::AppliedStyle;

/// Host widget toolkit.
///
/// The engine owns the widget tree model and calls into the toolkit to
/// mirror it. Every method runs on the UI thread. `apply_style` must be
/// idempotent: the engine may hand over an unchanged style.
pub trait Toolkit {
    /// A widget was added to the tree. Called before its first style.
    fn construct(&mut self, node: NodeId, data: &NodeData, parent: Option<NodeId>) {
        let _ = (node, data, parent);
    }

    /// Bring the native widget up to date.
    fn apply_style(&mut self, style: &AppliedStyle);

    /// A widget was removed from the tree.
    fn destroy(&mut self, node: NodeId) {
        let _ = node;
    }
}

impl<T: Toolkit + ?Sized> Toolkit for Box<T> {
    fn construct(&mut self, node: NodeId, data: &NodeData, parent: Option<NodeId>) {
        (**self).construct(node, data, parent)
    }

    fn apply_style(&mut self, style: &AppliedStyle) {
        (**self).apply_style(style)
    }

    fn destroy(&mut self, node: NodeId) {
        (**self).destroy(node)
    }
}
