//! Crate-wide error types.
//!
//! Errors only arise while loading configuration: parsing the stylesheet or
//! constructing a widget whose resolved declarations are unsupported. Style
//! resolution at runtime never fails.

use std::io;
use std::path::PathBuf;

use crate::css::parser::ParseError;
use crate::css::values::ValueError;
use crate::dom::NodeId;

/// Authoring errors detected when a widget's declarations are interpreted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported transition property: {0}")]
    UnsupportedTransitionProperty(String),
    #[error("unsupported easing: {0}")]
    UnsupportedEasing(String),
    #[error("malformed transition entry: {0:?}")]
    MalformedTransition(String),
    #[error("unsupported cursor: {0}")]
    UnsupportedCursor(String),
    #[error("{property} cannot be conditioned on state ({widget})")]
    ConditionedProperty { property: String, widget: String },
    #[error("invalid value {value:?} for {property}: {source}")]
    InvalidValue {
        property: String,
        value: String,
        #[source]
        source: ValueError,
    },
}

/// Top-level error for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read stylesheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown widget {0:?}")]
    UnknownWidget(NodeId),
    #[error("signal receiver dropped")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_converts() {
        let err: Error = ParseError::UnknownPseudoClass("focus".into()).into();
        assert_eq!(err.to_string(), "unknown pseudo-class :focus");
    }

    #[test]
    fn config_error_message() {
        let err = ConfigError::ConditionedProperty {
            property: "transition".into(),
            widget: "Button".into(),
        };
        assert_eq!(
            err.to_string(),
            "transition cannot be conditioned on state (Button)"
        );
    }

    #[test]
    fn invalid_value_message() {
        let err = ConfigError::InvalidValue {
            property: "background".into(),
            value: "red".into(),
            source: ValueError::Color("red".into()),
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"red\" for background: invalid color: red"
        );
    }
}
