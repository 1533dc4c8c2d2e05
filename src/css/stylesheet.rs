//! Rule index: parsed rules keyed by their subject selector's name.

use std::collections::HashMap;
use std::path::Path;

use crate::css::model::StylesheetRule;
use crate::css::parser::{parse_stylesheet, ParseError};
use crate::error::Error;

/// A parsed, immutable stylesheet.
///
/// Rules are stored under the name of their rightmost selector (`*`, a type
/// name, or `#name`) in source order, so candidates for a widget are an O(1)
/// lookup per name.
#[derive(Debug, Default)]
pub struct Stylesheet {
    by_subject: HashMap<String, Vec<StylesheetRule>>,
    len: usize,
}

impl Stylesheet {
    /// An empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and index stylesheet text. Fails on the first error.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let rules = parse_stylesheet(source)?;
        let sheet = Self::from_rules(rules);
        tracing::debug!(
            rules = sheet.len,
            subjects = sheet.by_subject.len(),
            "stylesheet loaded"
        );
        Ok(sheet)
    }

    /// Read and parse a stylesheet file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&source)?)
    }

    /// Index already-parsed rules, preserving their order.
    pub fn from_rules(rules: impl IntoIterator<Item = StylesheetRule>) -> Self {
        let mut sheet = Self::new();
        for rule in rules {
            sheet
                .by_subject
                .entry(rule.subject().name.clone())
                .or_default()
                .push(rule);
            sheet.len += 1;
        }
        sheet
    }

    /// Rules whose subject selector is named `name`, in source order.
    pub fn candidates(&self, name: &str) -> &[StylesheetRule] {
        self.by_subject.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the stylesheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
