//! Tree queries: descendant search for `:has()`.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// First descendant of `id` satisfying `predicate`.
    ///
    /// With `direct_only`, only immediate children are considered; otherwise
    /// the whole subtree is searched in pre-order. The widget itself is never
    /// a candidate. The traversal order is fixed, so repeated queries on an
    /// unchanged tree return the same widget.
    pub fn first_descendant(
        &self,
        id: NodeId,
        direct_only: bool,
        predicate: impl Fn(&NodeData) -> bool,
    ) -> Option<NodeId> {
        let matches = |node: &NodeId| self.get(*node).is_some_and(&predicate);
        if direct_only {
            self.children(id).iter().copied().find(matches)
        } else {
            self.subtree(id).into_iter().skip(1).find(matches)
        }
    }
}
