//! Condition-tracking cascade: per-property candidate lists, resolved on demand.
//!
//! Each property keeps an ordered list of [`StyleSource`]s, most recently
//! applicable first. Resolution picks, per property, the first source whose
//! conditions hold against the current widget states. The lists are kept
//! around so a state change only costs a re-walk, never a re-match.

use std::collections::BTreeMap;

use crate::css::state::State;
use crate::dom::NodeId;

/// Properties a widget copies from its parent before its own rules apply.
pub const INHERITED_KEYS: [&str; 6] = [
    "font",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "color",
];

/// Final property → value map handed to the style applier.
pub type ResolvedStyle = BTreeMap<String, String>;

/// A requirement that `target` currently has every bit of `state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleCondition {
    pub target: NodeId,
    pub state: State,
}

impl StyleCondition {
    pub fn new(target: NodeId, state: State) -> Self {
        Self { target, state }
    }

    /// Whether the condition can ever change its outcome.
    pub fn is_stateful(&self) -> bool {
        !self.state.is_empty()
    }

    /// Evaluate against live states. A missing target only satisfies an
    /// empty requirement.
    pub fn holds(&self, state_of: impl Fn(NodeId) -> Option<State>) -> bool {
        if !self.is_stateful() {
            return true;
        }
        state_of(self.target).is_some_and(|live| self.state.holds_in(live))
    }
}

/// One candidate value for a property, guarded by AND-ed conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSource {
    pub conditions: Vec<StyleCondition>,
    pub value: String,
    /// Copied from the parent's cascade rather than matched on this widget.
    pub inherited: bool,
}

impl StyleSource {
    pub fn new(conditions: Vec<StyleCondition>, value: impl Into<String>) -> Self {
        Self {
            conditions,
            value: value.into(),
            inherited: false,
        }
    }

    /// A source that always applies.
    pub fn unconditional(value: impl Into<String>) -> Self {
        Self::new(Vec::new(), value)
    }

    /// Mark as carried over from a parent (builder).
    pub fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    /// Whether any condition carries state bits.
    pub fn is_stateful(&self) -> bool {
        self.conditions.iter().any(StyleCondition::is_stateful)
    }

    /// Whether every condition holds.
    pub fn holds(&self, state_of: &impl Fn(NodeId) -> Option<State>) -> bool {
        self.conditions.iter().all(|c| c.holds(state_of))
    }

    /// Whether any condition names `target`.
    pub fn depends_on(&self, target: NodeId) -> bool {
        self.conditions.iter().any(|c| c.target == target)
    }
}

/// Property name → candidate sources, highest priority first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cascade {
    properties: BTreeMap<String, Vec<StyleSource>>,
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the inherited properties of `parent`, every source marked
    /// inherited.
    pub fn inherit_from(parent: &Cascade) -> Self {
        let properties = parent
            .properties
            .iter()
            .filter(|(key, _)| INHERITED_KEYS.contains(&key.as_str()))
            .map(|(key, sources)| {
                let sources = sources.iter().cloned().map(StyleSource::inherited).collect();
                (key.clone(), sources)
            })
            .collect();
        Self { properties }
    }

    /// Insert a source at the highest priority it may take.
    ///
    /// Own sources always rank above inherited ones. Among own sources,
    /// stateful ones go to the front and an unconditional one goes behind
    /// the own stateful sources already present, so it never hides them.
    /// Inherited sources keep their arrival order at the back.
    pub fn push(&mut self, key: impl Into<String>, source: StyleSource) {
        let sources = self.properties.entry(key.into()).or_default();
        let index = if source.inherited {
            sources.len()
        } else if source.is_stateful() {
            0
        } else {
            sources
                .iter()
                .position(|s| s.inherited || !s.is_stateful())
                .unwrap_or(sources.len())
        };
        sources.insert(index, source);
    }

    /// Push every declaration of a matched rule under the same conditions.
    pub fn push_declarations<'a>(
        &mut self,
        conditions: &[StyleCondition],
        declarations: impl IntoIterator<Item = &'a (String, String)>,
    ) {
        for (key, value) in declarations {
            self.push(key.clone(), StyleSource::new(conditions.to_vec(), value.clone()));
        }
    }

    /// Candidate sources for `key`, highest priority first.
    pub fn sources(&self, key: &str) -> &[StyleSource] {
        self.properties.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Drop a property entirely. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.properties.remove(key).is_some()
    }

    /// Pop a property's sources.
    pub fn take(&mut self, key: &str) -> Option<Vec<StyleSource>> {
        self.properties.remove(key)
    }

    /// Drop every source with a condition on `target`. Returns whether
    /// anything was removed.
    pub fn prune(&mut self, target: NodeId) -> bool {
        let mut changed = false;
        self.properties.retain(|_, sources| {
            let before = sources.len();
            sources.retain(|s| !s.depends_on(target));
            changed |= sources.len() != before;
            !sources.is_empty()
        });
        changed
    }

    /// Widgets named by stateful conditions, deduplicated.
    pub fn dependencies(&self) -> Vec<NodeId> {
        let mut targets: Vec<NodeId> = Vec::new();
        for condition in self
            .properties
            .values()
            .flatten()
            .flat_map(|s| &s.conditions)
            .filter(|c| c.is_stateful())
        {
            if !targets.contains(&condition.target) {
                targets.push(condition.target);
            }
        }
        targets
    }

    /// First holding source per property. Properties with no holding source
    /// are absent.
    pub fn resolve(&self, state_of: impl Fn(NodeId) -> Option<State>) -> ResolvedStyle {
        self.properties
            .iter()
            .filter_map(|(key, sources)| {
                sources
                    .iter()
                    .find(|s| s.holds(&state_of))
                    .map(|s| (key.clone(), s.value.clone()))
            })
            .collect()
    }

    /// Property names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
