//! Style language: tokenizer, parser, selector model, matcher, cascade, transitions.

pub mod state;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod expand;
pub mod values;
pub mod stylesheet;
pub mod matcher;
pub mod cascade;
pub mod transition;

pub use crate::error::ConfigError;
pub use cascade::{Cascade, ResolvedStyle, StyleCondition, StyleSource, INHERITED_KEYS};
pub use model::{Selector, StylesheetRule};
pub use parser::ParseError;
pub use state::{State, StatePair};
pub use stylesheet::Stylesheet;
