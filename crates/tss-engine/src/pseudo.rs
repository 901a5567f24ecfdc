//! Pseudo-output dispatch: redirecting a value away from default content
//! mutation.

use std::collections::HashMap;

/// Read-only view of the pseudo-functions a matched rule requested.
///
/// Implemented by the selector-matching collaborator; queried once per
/// evaluation, never mutated by this engine.
pub trait PseudoMatcher {
    /// Whether the rule requested the pseudo-function `name`.
    fn has_function(&self, name: &str) -> bool;

    /// The raw argument text of the pseudo-function `name`, if present.
    fn func_args(&self, name: &str) -> Option<&str>;
}

/// The single output strategy selected for one evaluation.
///
/// At most one of these applies per (node, rule) pair; resolution probes
/// the four pseudo names in fixed priority order and the first match
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoEffect {
    /// Write the value into the named attribute of the target node.
    Attr(String),
    /// Append a (name, value) pair to the shared headers sink.
    Header(String),
    /// Insert the materialized value as the target's new leading
    /// children.
    Before,
    /// Append the materialized value as the target's trailing children.
    After,
}

impl PseudoEffect {
    /// Resolve the matcher's pseudo-functions into at most one effect.
    ///
    /// Priority order: `attr`, `header`, `before`, `after`.
    #[must_use]
    pub fn resolve(matcher: &dyn PseudoMatcher) -> Option<Self> {
        if matcher.has_function("attr") {
            let name = matcher.func_args("attr").unwrap_or_default();
            return Some(Self::Attr(name.to_owned()));
        }
        if matcher.has_function("header") {
            let name = matcher.func_args("header").unwrap_or_default();
            return Some(Self::Header(name.to_owned()));
        }
        if matcher.has_function("before") {
            return Some(Self::Before);
        }
        if matcher.has_function("after") {
            return Some(Self::After);
        }
        None
    }
}

/// A map-backed [`PseudoMatcher`] for drivers and tests.
#[derive(Debug, Default)]
pub struct PseudoFunctions {
    funcs: HashMap<String, String>,
}

impl PseudoFunctions {
    /// A matcher reporting no pseudo-functions.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A matcher reporting a single pseudo-function with argument text.
    #[must_use]
    pub fn one(name: &str, args: &str) -> Self {
        Self::none().with(name, args)
    }

    /// Add a pseudo-function.
    #[must_use]
    pub fn with(mut self, name: &str, args: &str) -> Self {
        self.funcs.insert(name.to_owned(), args.to_owned());
        self
    }
}

impl PseudoMatcher for PseudoFunctions {
    fn has_function(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    fn func_args(&self, name: &str) -> Option<&str> {
        self.funcs.get(name).map(String::as_str)
    }
}
