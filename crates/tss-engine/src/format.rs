//! The formatter pipeline: named value transformations resolved across
//! registered providers.

use std::collections::HashMap;

use crate::extract::StringExtractor;
use crate::rules::RuleSet;
use crate::value::Value;

/// A named formatting operation: `(item, args) -> item`.
pub type FormatFn<'a> = &'a dyn Fn(Value, &[String]) -> Value;

/// A source of named formatting operations.
///
/// Providers are probed by operation name on every apply; a provider that
/// does not know a name simply returns `None`.
pub trait FormatProvider {
    /// Look up the operation registered under `name`.
    fn lookup(&self, name: &str) -> Option<FormatFn<'_>>;
}

/// A map-backed [`FormatProvider`].
#[derive(Default)]
pub struct FunctionSet {
    #[allow(clippy::type_complexity)]
    fns: HashMap<String, Box<dyn Fn(Value, &[String]) -> Value>>,
}

impl FunctionSet {
    /// Create an empty function set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under `name`, replacing any previous one.
    pub fn insert(&mut self, name: &str, f: impl Fn(Value, &[String]) -> Value + 'static) {
        self.fns.insert(name.to_owned(), Box::new(f));
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: &str, f: impl Fn(Value, &[String]) -> Value + 'static) -> Self {
        self.insert(name, f);
        self
    }
}

impl FormatProvider for FunctionSet {
    fn lookup(&self, name: &str) -> Option<FormatFn<'_>> {
        self.fns.get(name).map(Box::as_ref)
    }
}

/// The formatter pipeline.
///
/// Holds an ordered list of registered providers. A `format` declaration
/// names one operation; on apply, *every* provider exposing that name is
/// invoked in registration order, each consuming the previous one's
/// output. Unknown names pass items through unchanged.
#[derive(Default)]
pub struct Formatter {
    providers: Vec<Box<dyn FormatProvider>>,
}

impl Formatter {
    /// Create a pipeline with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the probe list. Providers live as long as the
    /// pipeline; there is no removal.
    pub fn register(&mut self, provider: impl FormatProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Apply the rule set's `format` declaration to every value item.
    ///
    /// Without a `format` declaration this is the identity transform.
    #[must_use]
    pub fn format(&self, value: Vec<Value>, rules: &RuleSet) -> Vec<Value> {
        let Some(raw) = rules.get("format") else {
            return value;
        };

        let extractor = StringExtractor::new(raw);
        let protected = extractor.to_string();
        let mut tokens = protected.split_whitespace();
        let Some(name) = tokens.next() else {
            return value;
        };
        let args: Vec<String> = tokens
            .map(|token| extractor.rebuild(token).trim_matches('"').to_owned())
            .collect();

        value
            .into_iter()
            .map(|item| self.apply(name, item, &args))
            .collect()
    }

    fn apply(&self, name: &str, mut item: Value, args: &[String]) -> Value {
        for provider in &self.providers {
            if let Some(f) = provider.lookup(name) {
                item = f(item, args);
            }
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn upper(item: Value, _args: &[String]) -> Value {
        Value::Text(item.text_content().to_uppercase())
    }

    #[test]
    fn test_identity_without_format_declaration() {
        let formatter = Formatter::new();
        let out = formatter.format(vec![Value::from("Hello")], &RuleSet::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text_content(), "Hello");
    }

    #[test]
    fn test_single_provider() {
        let mut formatter = Formatter::new();
        formatter.register(FunctionSet::new().with("upper", upper));

        let rules: RuleSet = [("format", "upper")].into();
        let out = formatter.format(vec![Value::from("Hello")], &rules);
        assert_eq!(out[0].text_content(), "HELLO");
    }

    #[test]
    fn test_unknown_function_passes_through() {
        let mut formatter = Formatter::new();
        formatter.register(FunctionSet::new().with("upper", upper));

        let rules: RuleSet = [("format", "sparkle")].into();
        let out = formatter.format(vec![Value::from("Hello")], &rules);
        assert_eq!(out[0].text_content(), "Hello");
    }

    #[test]
    fn test_same_name_chains_in_registration_order() {
        let mut formatter = Formatter::new();
        formatter.register(FunctionSet::new().with("mark", |item, _| {
            Value::Text(format!("{}-first", item.text_content()))
        }));
        formatter.register(FunctionSet::new().with("mark", |item, _| {
            Value::Text(format!("{}-second", item.text_content()))
        }));

        let rules: RuleSet = [("format", "mark")].into();
        let out = formatter.format(vec![Value::from("x")], &rules);
        assert_eq!(out[0].text_content(), "x-first-second");
    }

    #[test]
    fn test_arguments_passed_to_operation() {
        let mut formatter = Formatter::new();
        formatter.register(FunctionSet::new().with("suffix", |item, args| {
            Value::Text(format!("{}{}", item.text_content(), args.join("+")))
        }));

        let rules: RuleSet = [("format", "suffix a b")].into();
        let out = formatter.format(vec![Value::from("x")], &rules);
        assert_eq!(out[0].text_content(), "xa+b");
    }

    #[test]
    fn test_quoted_argument_with_whitespace_stays_whole() {
        let mut formatter = Formatter::new();
        formatter.register(FunctionSet::new().with("suffix", |item, args| {
            Value::Text(format!("{}[{}]", item.text_content(), args.join("|")))
        }));

        let rules: RuleSet = [("format", r#"suffix "d m Y" plain"#)].into();
        let out = formatter.format(vec![Value::from("x")], &rules);
        assert_eq!(out[0].text_content(), "x[d m Y|plain]");
    }

    #[test]
    fn test_every_item_transformed_independently() {
        let mut formatter = Formatter::new();
        formatter.register(FunctionSet::new().with("upper", upper));

        let rules: RuleSet = [("format", "upper")].into();
        let out = formatter.format(vec![Value::from("a"), Value::from("b")], &rules);
        assert_eq!(out[0].text_content(), "A");
        assert_eq!(out[1].text_content(), "B");
    }

    #[test]
    fn test_empty_value_sequence() {
        let mut formatter = Formatter::new();
        formatter.register(FunctionSet::new().with("upper", upper));

        let rules: RuleSet = [("format", "upper")].into();
        assert!(formatter.format(Vec::new(), &rules).is_empty());
    }
}
