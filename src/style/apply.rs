//! Style applier: resolved property map → toolkit mutations.
//!
//! [`apply`] is pure. It pops the properties that need direct toolkit calls
//! (effects, size limits, position, layout spacing, tooltip, rotation),
//! computes contents margins, and renders whatever remains as the widget's
//! native stylesheet text. The host executes the result through
//! [`Toolkit::apply_style`](crate::widget::Toolkit::apply_style).

use std::fmt::Write as _;

use crate::css::cascade::ResolvedStyle;
use crate::css::values::{parse_float, parse_length, Color, ValueError};
use crate::dom::{Capabilities, LayoutKind, NodeData, NodeId};
use crate::error::ConfigError;
use crate::geometry::{Offset, Spacing};

// ---------------------------------------------------------------------------
// Construction-time attributes
// ---------------------------------------------------------------------------

/// Pointer shape override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    /// Pointing hand.
    Pointer,
}

impl CursorShape {
    pub fn parse(src: &str) -> Result<Self, ConfigError> {
        match src.trim() {
            "pointer" => Ok(CursorShape::Pointer),
            other => Err(ConfigError::UnsupportedCursor(other.to_owned())),
        }
    }
}

/// Attributes fixed when the widget is constructed. They ride along with
/// every application so the toolkit can treat each [`AppliedStyle`] as
/// complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleAttributes {
    pub cursor: Option<CursorShape>,
    pub scrollbar_width: Option<i32>,
    /// The widget declares `background` somewhere in its cascade and needs
    /// its background painted from the stylesheet.
    pub styled_background: bool,
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

/// Side of the owner a tooltip appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TooltipAnchor {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl TooltipAnchor {
    pub fn parse(src: &str) -> Option<Self> {
        match src.trim() {
            "top" => Some(TooltipAnchor::Top),
            "right" => Some(TooltipAnchor::Right),
            "bottom" => Some(TooltipAnchor::Bottom),
            "left" => Some(TooltipAnchor::Left),
            _ => None,
        }
    }
}

/// Request to show a tooltip next to `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipSummons {
    pub owner: NodeId,
    pub anchor: TooltipAnchor,
    pub text: String,
    /// Extra distance from the owner in pixels.
    pub distance: i32,
}

// ---------------------------------------------------------------------------
// AppliedStyle
// ---------------------------------------------------------------------------

/// Everything the toolkit must do to bring a widget up to date.
///
/// `None` fields mean "leave the toolkit default"; `opacity: None` and
/// `tooltip: None` additionally mean "remove the effect / hide the tooltip".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedStyle {
    pub node: NodeId,
    pub opacity: Option<f32>,
    /// Colorize effect for vector icons.
    pub colorize: Option<Color>,
    pub min_width: Option<i32>,
    pub max_width: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    /// Margin plus padding. Goes on the layout when `layout` is set,
    /// otherwise on the widget.
    pub contents_margins: Spacing,
    pub layout: Option<LayoutKind>,
    pub position: Option<Offset>,
    /// Layout spacing, only for widgets with a layout.
    pub spacing: Option<i32>,
    pub tooltip: Option<TooltipSummons>,
    pub rotation: Option<f32>,
    pub attributes: StyleAttributes,
    /// `Type { key: value; ... }`, or empty when nothing is left.
    pub native: String,
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Turn a resolved style into toolkit mutations.
///
/// Unparseable numeric values are logged and skipped.
pub fn apply(
    node: NodeId,
    data: &NodeData,
    attributes: &StyleAttributes,
    resolved: &ResolvedStyle,
) -> AppliedStyle {
    let mut style = resolved.clone();
    let mut applied = AppliedStyle {
        node,
        layout: data.layout,
        attributes: *attributes,
        ..AppliedStyle::default()
    };

    applied.opacity = pop_with(&mut style, "opacity", parse_float);

    if data.supports(Capabilities::COLORIZABLE) {
        applied.colorize = pop_with(&mut style, "color", Color::parse);
    }

    applied.min_width = pop_with(&mut style, "min-width", parse_length);
    applied.max_width = pop_with(&mut style, "max-width", parse_length);
    applied.min_height = pop_with(&mut style, "min-height", parse_length);
    applied.max_height = pop_with(&mut style, "max-height", parse_length);

    applied.contents_margins = box_sides(&style, "margin") + box_sides(&style, "padding");

    let left = pop_with(&mut style, "left", parse_length);
    let top = pop_with(&mut style, "top", parse_length);
    if left.is_some() || top.is_some() {
        applied.position = Some(Offset::new(left.unwrap_or(0), top.unwrap_or(0)));
    }

    let spacing = pop_with(&mut style, "spacing", parse_length);
    if data.layout.is_some() {
        applied.spacing = spacing;
    }

    applied.tooltip = tooltip(node, &mut style);

    if data.supports(Capabilities::ROTATABLE) {
        applied.rotation = pop_with(&mut style, "rotate", parse_float);
    }

    applied.native = native_text(data, &style);
    applied
}

/// Render `Type { k: v; ... }` with the last segment of the type name.
pub fn native_text(data: &NodeData, style: &ResolvedStyle) -> String {
    if style.is_empty() {
        return String::new();
    }
    let mut text = format!("{} {{ ", data.short_type());
    for (key, value) in style {
        let _ = write!(text, "{key}: {value}; ");
    }
    text.push('}');
    text
}

fn pop_with<T>(
    style: &mut ResolvedStyle,
    key: &str,
    parse: impl Fn(&str) -> Result<T, ValueError>,
) -> Option<T> {
    let raw = style.remove(key)?;
    parse_or_warn(key, &raw, parse)
}

fn parse_or_warn<T>(key: &str, raw: &str, parse: impl Fn(&str) -> Result<T, ValueError>) -> Option<T> {
    match parse(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(property = key, %err, "skipping unparseable value");
            None
        }
    }
}

/// Read (without popping) the four `{prefix}-{side}` lengths.
fn box_sides(style: &ResolvedStyle, prefix: &str) -> Spacing {
    let side = |name: &str| {
        let key = format!("{prefix}-{name}");
        style
            .get(&key)
            .and_then(|raw| parse_or_warn(&key, raw, parse_length))
            .unwrap_or(0)
    };
    Spacing::new(side("top"), side("right"), side("bottom"), side("left"))
}

fn tooltip(owner: NodeId, style: &mut ResolvedStyle) -> Option<TooltipSummons> {
    let anchor = style.remove("tooltip-anchor");
    let distance = pop_with(style, "tooltip-distance", parse_length).unwrap_or(0);
    let text = style.remove("tooltip")?;
    let anchor = match anchor {
        Some(raw) => TooltipAnchor::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(anchor = %raw, "unknown tooltip anchor, using top");
            TooltipAnchor::Top
        }),
        None => TooltipAnchor::Top,
    };
    Some(TooltipSummons {
        owner,
        anchor,
        text: unquote(&text).to_owned(),
        distance,
    })
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
