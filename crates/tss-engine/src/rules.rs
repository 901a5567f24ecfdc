//! Resolved rule sets: declaration-name to declaration-text mappings.

use std::collections::HashMap;

/// How default content mutation writes the value into the target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    /// Append the materialized value as children of the target.
    #[default]
    Append,
    /// Insert the materialized value as siblings before the target and
    /// mark the target itself as removed.
    Replace,
}

/// The declarations applicable to one node from one matched selector.
///
/// Keys consumed by this engine: `format` (free text) and `content-mode`
/// (`"replace"` or `"append"`, defaulting to append). Other declarations
/// are carried untouched for the surrounding system.
#[derive(Debug, Default)]
pub struct RuleSet {
    decls: HashMap<String, String>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a declaration.
    pub fn set(&mut self, name: &str, text: &str) {
        self.decls.insert(name.to_owned(), text.to_owned());
    }

    /// Raw declaration text by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.decls.get(name).map(String::as_str)
    }

    /// The `content-mode` declaration. Anything other than `"replace"`
    /// (including an absent declaration) is append.
    #[must_use]
    pub fn content_mode(&self) -> ContentMode {
        match self.get("content-mode") {
            Some("replace") => ContentMode::Replace,
            _ => ContentMode::Append,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            decls: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for RuleSet {
    fn from(decls: [(K, V); N]) -> Self {
        decls.into_iter().collect()
    }
}
