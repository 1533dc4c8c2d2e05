//! Selector matching: DOM-aware, ancestor-walking, state-free.
//!
//! Matching only decides whether a rule's structure fits a widget's lineage.
//! Pseudo-class requirements are not checked here; they are turned into
//! [`StyleCondition`]s and evaluated by the cascade whenever state changes.

use crate::css::cascade::StyleCondition;
use crate::css::model::{Selector, StylesheetRule};
use crate::dom::{Dom, NodeId};

/// Check whether `selector` names the widget `node`.
pub fn matches_node(dom: &Dom, node: NodeId, selector: &Selector) -> bool {
    dom.get(node)
        .is_some_and(|data| selector.matches_name(&data.widget_type, data.name.as_deref()))
}

/// Match a rule against `node` as its subject.
///
/// Returns the state conditions the match depends on, or `None` if the rule
/// does not apply. An empty vec means the rule applies unconditionally.
pub fn match_rule(dom: &Dom, node: NodeId, rule: &StylesheetRule) -> Option<Vec<StyleCondition>> {
    if !dom.contains(node) {
        return None;
    }
    let mut lineage = Vec::with_capacity(8);
    lineage.push(node);
    lineage.extend(dom.ancestors(node));

    let mut conditions = Vec::new();
    let mut cursor = 0;
    let mut direct = false;

    for (index, selector) in rule.selectors.iter().rev().enumerate() {
        // The subject must be the widget itself; later selectors may skip
        // ancestors unless the previous one was a direct child.
        let anchored = index == 0 || direct;
        let mut matched = false;

        while let Some(&candidate) = lineage.get(cursor) {
            cursor += 1;
            if let Some(bound) = match_compound(dom, candidate, selector) {
                if !selector.state.is_empty() {
                    conditions.push(StyleCondition::new(candidate, selector.state));
                }
                conditions.extend(bound);
                matched = true;
                break;
            }
            if anchored {
                break;
            }
        }

        if !matched {
            return None;
        }
        direct = selector.is_direct_descendant;
    }

    Some(conditions)
}

/// Name and `:has()` check for a single lineage entry.
///
/// On success returns the condition contributed by the bound `:has()`
/// descendant, if any.
fn match_compound(dom: &Dom, node: NodeId, selector: &Selector) -> Option<Option<StyleCondition>> {
    if !matches_node(dom, node, selector) {
        return None;
    }
    let Some(inner) = selector.has.as_deref() else {
        return Some(None);
    };
    let bound = dom.first_descendant(node, inner.is_direct_descendant, |data| {
        inner.matches_name(&data.widget_type, data.name.as_deref())
    })?;
    if inner.state.is_empty() {
        Some(None)
    } else {
        Some(Some(StyleCondition::new(bound, inner.state)))
    }
}
