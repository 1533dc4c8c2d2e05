//! Snapshot helpers: render a widget tree's native styles as text.

use std::fmt::Write as _;

use crate::style::StyleEngine;
use crate::widget::Toolkit;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render every widget as one line, indented by depth, in pre-order.
///
/// Each line is the widget's `Type#name` label, followed by ` | ` and its
/// native stylesheet text when that is non-empty. Lines are separated by
/// `'\n'` with no trailing newline.
///
/// ```text
/// Window
///   Badge
///   Label#title | Label { color: red; }
/// ```
pub fn style_tree<T: Toolkit>(engine: &StyleEngine<T>) -> String {
    let dom = engine.dom();
    let mut out = String::new();
    for root in dom.roots() {
        for node in dom.subtree(root) {
            let Some(data) = dom.get(node) else {
                continue;
            };
            if !out.is_empty() {
                out.push('\n');
            }
            let depth = dom.depth(node);
            let _ = write!(out, "{:indent$}{}", "", data.describe(), indent = depth * 2);
            match engine.native_style(node) {
                Some(native) if !native.is_empty() => {
                    let _ = write!(out, " | {native}");
                }
                _ => {}
            }
        }
    }
    out
}

// ===========================================================================
// Tests
// ===========================================================================
