//! The widget tree: an arena of [`NodeData`] with parent/child links.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Every widget the engine has constructed, keyed by [`NodeId`].
///
/// Widgets live in one `SlotMap`; links live in secondary maps, so a removed
/// widget's id simply stops resolving and can never alias a newer widget.
/// Top-level widgets (windows, popups) have no parent entry.
#[derive(Debug, Default)]
pub struct Dom {
    nodes: SlotMap<NodeId, NodeData>,
    kids: SecondaryMap<NodeId, Vec<NodeId>>,
    up: SecondaryMap<NodeId, NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level widget.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.kids.insert(id, Vec::new());
        id
    }

    /// Add a widget after the existing children of `parent`.
    ///
    /// `None` (and nothing inserted) when `parent` is not in the tree.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.insert(data);
        self.up.insert(id, parent);
        if let Some(kids) = self.kids.get_mut(parent) {
            kids.push(id);
        }
        Some(id)
    }

    /// Detach `id` from its parent and drop it with its whole subtree.
    ///
    /// Returns the dropped ids in pre-order, `id` first; empty when `id`
    /// was already gone.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        let dropped = self.subtree(id);
        if let Some(parent) = self.up.get(id).copied() {
            if let Some(kids) = self.kids.get_mut(parent) {
                kids.retain(|&kid| kid != id);
            }
        }
        for &gone in &dropped {
            self.nodes.remove(gone);
            self.kids.remove(gone);
            self.up.remove(gone);
        }
        dropped
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.up.get(id).copied()
    }

    /// Direct children in insertion order; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.kids.get(id).map_or(&[], Vec::as_slice)
    }

    /// Parent, grandparent, ... up to the top-level widget.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            dom: self,
            next: self.parent(id),
        }
    }

    /// Number of ancestors.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Top-level widgets, in arena order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|&id| !self.up.contains_key(id))
            .collect()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// `start` and everything below it, pre-order, children in insertion
    /// order. Empty when `start` is not in the tree.
    pub fn subtree(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut pending = Vec::new();
        if self.contains(start) {
            pending.push(start);
        }
        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend(self.children(id).iter().rev());
        }
        order
    }
}

/// Iterator returned by [`Dom::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    dom: &'a Dom,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.dom.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Server {
        dom: Dom,
        window: NodeId,
        sidebar: NodeId,
        guild: NodeId,
        pill: NodeId,
        icon: NodeId,
        chat: NodeId,
    }

    // Window
    // ├── Sidebar
    // │   └── Guild
    // │       ├── Pill
    // │       └── Icon
    // └── ChatBox
    fn server() -> Server {
        let mut dom = Dom::new();
        let window = dom.insert(NodeData::new("Window"));
        let sidebar = dom.insert_child(window, NodeData::new("Sidebar")).unwrap();
        let guild = dom.insert_child(sidebar, NodeData::new("Guild")).unwrap();
        let pill = dom.insert_child(guild, NodeData::new("Pill")).unwrap();
        let icon = dom.insert_child(guild, NodeData::new("Icon")).unwrap();
        let chat = dom.insert_child(window, NodeData::new("ChatBox")).unwrap();
        Server { dom, window, sidebar, guild, pill, icon, chat }
    }

    #[test]
    fn links() {
        let s = server();
        assert_eq!(s.dom.parent(s.pill), Some(s.guild));
        assert_eq!(s.dom.parent(s.window), None);
        assert_eq!(s.dom.children(s.window), &[s.sidebar, s.chat]);
        assert_eq!(s.dom.children(s.guild), &[s.pill, s.icon]);
        assert!(s.dom.children(s.icon).is_empty());
    }

    #[test]
    fn orphan_insert_is_rejected() {
        let mut s = server();
        s.dom.remove(s.chat);
        assert!(s.dom.insert_child(s.chat, NodeData::new("Message")).is_none());
        assert_eq!(s.dom.len(), 5);
    }

    #[test]
    fn ancestors_walk_outward() {
        let s = server();
        let chain: Vec<_> = s.dom.ancestors(s.pill).collect();
        assert_eq!(chain, vec![s.guild, s.sidebar, s.window]);
        assert_eq!(s.dom.depth(s.pill), 3);
        assert_eq!(s.dom.ancestors(s.window).next(), None);
    }

    #[test]
    fn subtree_is_preorder() {
        let s = server();
        assert_eq!(
            s.dom.subtree(s.window),
            vec![s.window, s.sidebar, s.guild, s.pill, s.icon, s.chat]
        );
        assert_eq!(s.dom.subtree(s.icon), vec![s.icon]);
    }

    #[test]
    fn roots_include_popups() {
        let mut s = server();
        let popup = s.dom.insert(NodeData::new("Tooltip"));
        assert_eq!(s.dom.roots(), vec![s.window, popup]);
    }

    #[test]
    fn remove_drops_subtree_and_unlinks() {
        let mut s = server();
        assert_eq!(s.dom.remove(s.guild), vec![s.guild, s.pill, s.icon]);
        assert!(!s.dom.contains(s.pill));
        assert!(s.dom.children(s.sidebar).is_empty());
        assert_eq!(s.dom.len(), 3);
        assert!(s.dom.remove(s.guild).is_empty());
        assert!(s.dom.get(s.icon).is_none());
    }
}
