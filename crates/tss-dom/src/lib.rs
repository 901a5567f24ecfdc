//! Mutable document tree for the TSS rule-effect engine.
//!
//! This crate provides the tree that rule effects are applied to:
//!
//! - [`Document`]: an arena of nodes addressed by copyable [`NodeId`]s,
//!   supporting attribute access, child/sibling insertion and removal,
//!   and deep-copy import across document boundaries
//! - [`NodeRole`]: the typed view of the `transphporm` marker attribute
//!   used to record node provenance
//! - [`Fragment`]: an owned, detached sub-tree used as a value item
//!
//! Markup can be round-tripped through [`Document::parse`] and
//! [`Document::serialize`].
//!
//! # Example
//!
//! ```
//! use tss_dom::Document;
//!
//! let mut doc = Document::parse("<ul><li>one</li></ul>").unwrap();
//! let ul = doc.children(doc.root())[0];
//! let li = doc.create_element("li");
//! let text = doc.create_text("two");
//! doc.append_child(li, text);
//! doc.append_child(ul, li);
//! assert_eq!(doc.serialize(), "<ul><li>one</li><li>two</li></ul>");
//! ```

mod document;
mod error;
mod fragment;
mod node;
mod xml;

pub use document::Document;
pub use error::DomError;
pub use fragment::Fragment;
pub use node::{MARKER_ATTR, NodeId, NodeRole};
