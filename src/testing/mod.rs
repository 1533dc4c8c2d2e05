//! Headless testing framework: Pilot, recording toolkit, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`StyleEngine`](crate::style::StyleEngine)
//! without a real widget toolkit. [`RecordingToolkit`] keeps every applied
//! style for assertions, and [`style_tree`] renders a whole tree for
//! snapshot tests.

pub mod pilot;
pub mod recorder;
pub mod snapshot;

pub use pilot::Pilot;
pub use recorder::RecordingToolkit;
pub use snapshot::style_tree;
