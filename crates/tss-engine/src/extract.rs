//! Quoted-string protection for declaration text.

use std::fmt;

/// Sentinel framing placeholder tokens. Private-use codepoint so it can
/// never collide with declaration text, and never whitespace so quoted
/// runs survive whitespace splitting.
const SENTINEL: char = '\u{e000}';

/// Protects double-quoted runs in raw declaration text behind placeholder
/// tokens.
///
/// The [`Display`](fmt::Display) form is the input with each quoted run
/// replaced by a placeholder; [`rebuild`](Self::rebuild) restores the
/// placeholders in a token back to the original quoted text (quotes
/// included). An unterminated quote is passed through as literal text
/// rather than validated here.
#[derive(Debug)]
pub struct StringExtractor {
    protected: String,
    strings: Vec<String>,
}

impl StringExtractor {
    /// Extract quoted runs from `raw`.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut protected = String::with_capacity(raw.len());
        let mut strings = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find('"') {
            protected.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('"') else {
                // Unterminated quote: keep the remainder as literal text.
                protected.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let quoted = &rest[open..=open + 1 + close];
            protected.push_str(&placeholder(strings.len()));
            strings.push(quoted.to_owned());
            rest = &after_open[close + 1..];
        }
        protected.push_str(rest);

        Self { protected, strings }
    }

    /// Substitute every placeholder in `token` back to its original
    /// quoted text.
    #[must_use]
    pub fn rebuild(&self, token: &str) -> String {
        let mut out = token.to_owned();
        for (index, original) in self.strings.iter().enumerate() {
            out = out.replace(&placeholder(index), original);
        }
        out
    }
}

impl fmt::Display for StringExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.protected)
    }
}

fn placeholder(index: usize) -> String {
    format!("{SENTINEL}{index}{SENTINEL}")
}
