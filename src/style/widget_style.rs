//! Per-widget style record: live state, cascade, dependency links, transitions.

use std::collections::BTreeSet;

use crate::css::cascade::{Cascade, ResolvedStyle, StyleSource};
use crate::css::state::State;
use crate::css::transition::{AnimationGroup, TransitionSpec};
use crate::css::values::parse_length;
use crate::dom::{NodeData, NodeId};
use crate::error::ConfigError;
use crate::style::apply::{CursorShape, StyleAttributes};

/// Style data attached to every widget the engine constructs.
#[derive(Debug, Clone)]
pub struct WidgetStyle {
    /// Live interaction state. Exactly one bit per pair.
    pub state: State,
    pub cascade: Cascade,
    /// Widgets to re-style when this widget's state changes.
    pub callbacks: BTreeSet<NodeId>,
    /// Widgets whose `callbacks` contain this widget.
    pub dependencies: BTreeSet<NodeId>,
    pub animations: AnimationGroup,
    pub attributes: StyleAttributes,
    /// Last resolved map after transition filtering.
    pub resolved: ResolvedStyle,
    /// Last native stylesheet text handed to the toolkit.
    pub native: String,
}

impl WidgetStyle {
    /// Build the record from a fully pushed cascade, pulling out the
    /// construction-time properties (`scrollbar-width`, `transition`,
    /// `cursor`).
    pub fn new(mut cascade: Cascade, data: &NodeData) -> Result<Self, ConfigError> {
        let mut attributes = StyleAttributes {
            styled_background: cascade.contains_key("background"),
            ..StyleAttributes::default()
        };

        if let Some(sources) = cascade.take("scrollbar-width") {
            let source = single_unconditioned("scrollbar-width", sources, data)?;
            let width = parse_length(&source.value).map_err(|err| ConfigError::InvalidValue {
                property: "scrollbar-width".to_owned(),
                value: source.value.clone(),
                source: err,
            })?;
            attributes.scrollbar_width = Some(width);
        }

        let animations = match cascade.take("transition") {
            Some(sources) => {
                let source = single_unconditioned("transition", sources, data)?;
                AnimationGroup::build(TransitionSpec::parse_list(&source.value)?, &cascade)?
            }
            None => AnimationGroup::new(),
        };

        if let Some(sources) = cascade.take("cursor") {
            if sources.iter().any(StyleSource::is_stateful) {
                return Err(conditioned("cursor", data));
            }
            if let Some(first) = sources.first() {
                attributes.cursor = Some(CursorShape::parse(&first.value)?);
            }
        }

        Ok(Self {
            state: State::DEFAULT,
            cascade,
            callbacks: BTreeSet::new(),
            dependencies: BTreeSet::new(),
            animations,
            attributes,
            resolved: ResolvedStyle::new(),
            native: String::new(),
        })
    }
}

fn single_unconditioned(
    property: &str,
    mut sources: Vec<StyleSource>,
    data: &NodeData,
) -> Result<StyleSource, ConfigError> {
    if sources.len() != 1 || sources[0].is_stateful() {
        return Err(conditioned(property, data));
    }
    Ok(sources.remove(0))
}

fn conditioned(property: &str, data: &NodeData) -> ConfigError {
    ConfigError::ConditionedProperty {
        property: property.to_owned(),
        widget: data.describe(),
    }
}
