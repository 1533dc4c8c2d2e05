//! Widget tree: slotmap-backed arena with descendant queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{Capabilities, LayoutKind, NodeData, NodeId};
pub use tree::{Ancestors, Dom};
