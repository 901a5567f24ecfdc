//! Rule-effect application engine for a markup-transformation system.
//!
//! Given a target node in a [`tss_dom::Document`], a matched rule set and
//! a resolved value, this crate decides *where* and *how* the value is
//! written into the document: as element content, an attribute, a
//! synthetic header, or nodes inserted around the target. Values are run
//! through a pluggable chain of named formatting functions first.
//!
//! Two components, consumed leaf-first:
//!
//! - [`Formatter`]: resolves a `format` declaration into a chain of named
//!   functions located across any number of registered
//!   [`FormatProvider`]s and applies it to every value item
//! - [`Content`]: the per-node, per-rule effector that gates eligibility,
//!   dispatches to at most one pseudo-output strategy, and otherwise
//!   mutates the target node's children
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use tss_dom::Document;
//! use tss_engine::{Content, Formatter, FunctionSet, PseudoFunctions, RuleSet, Value};
//!
//! let mut formatter = Formatter::new();
//! formatter.register(FunctionSet::new().with("upper", |item, _args| {
//!     Value::Text(item.text_content().to_uppercase())
//! }));
//! let content = Content::new(formatter, Rc::default());
//!
//! let mut doc = Document::parse("<h1>placeholder</h1>").unwrap();
//! let h1 = doc.children(doc.root())[0];
//! let rules: RuleSet = [("format", "upper")].into_iter().collect();
//!
//! content
//!     .run(
//!         &mut doc,
//!         h1,
//!         vec![Value::from("Hello")],
//!         &rules,
//!         &PseudoFunctions::none(),
//!     )
//!     .unwrap();
//! assert_eq!(doc.text_content(h1), "HELLO");
//! ```

mod content;
mod error;
mod extract;
mod format;
mod headers;
mod pseudo;
mod rules;
mod value;

pub use content::Content;
pub use error::EffectError;
pub use extract::StringExtractor;
pub use format::{FormatFn, FormatProvider, Formatter, FunctionSet};
pub use headers::Headers;
pub use pseudo::{PseudoEffect, PseudoFunctions, PseudoMatcher};
pub use rules::{ContentMode, RuleSet};
pub use value::Value;
