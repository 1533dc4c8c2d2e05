//! # cordial
//!
//! A state-reactive CSS cascade and transition engine for retained widget
//! trees, built for a chat client's UI layer.
//!
//! cordial parses a small CSS dialect (type, `#name` and `*` selectors,
//! descendant and child combinators, state pseudo-classes and `:has()`),
//! matches it against a slotmap-backed widget tree, and keeps every
//! widget's resolved style current as interaction state changes anywhere
//! the widget's selectors look. Selected properties animate between values
//! with declarative transitions.
//!
//! ## Core Systems
//!
//! - **[`css`]**: Tokenizer, parser, rule index, matcher, cascade and transitions
//! - **[`dom`]**: Slotmap-backed widget tree with descendant queries
//! - **[`style`]**: Per-widget style records and the [`StyleEngine`](style::StyleEngine)
//! - **[`widget`]**: The [`Toolkit`](widget::Toolkit) trait a host UI implements
//! - **[`event`]**: Interaction events, widget signals and the cross-thread bridge
//! - **[`app`]**: Configuration and the async frame loop
//! - **[`testing`]**: Headless pilot, recording toolkit and snapshot helpers
//! - **[`geometry`]**: Offset and Spacing primitives

// Foundation
pub mod error;
pub mod geometry;

// Core systems
pub mod css;
pub mod dom;
pub mod style;

// Host integration
pub mod event;
pub mod widget;

// Application
pub mod app;
pub mod testing;

pub use error::{ConfigError, Error};
