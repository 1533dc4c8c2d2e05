//! Widget styling: per-widget records, the engine service, the applier.

pub mod apply;
pub mod engine;
pub mod widget_style;

pub use apply::{apply, AppliedStyle, CursorShape, StyleAttributes, TooltipAnchor, TooltipSummons};
pub use engine::{StyleEngine, WidgetOptions};
pub use widget_style::WidgetStyle;
