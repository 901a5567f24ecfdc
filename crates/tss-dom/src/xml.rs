//! Markup parsing and serialization for [`Document`].

use std::fmt::Write;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::Document;
use crate::error::DomError;
use crate::node::NodeId;

impl Document {
    /// Parse markup into a document.
    ///
    /// The input is wrapped in a synthetic root so multiple top-level
    /// nodes are accepted; they become children of [`Document::root`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be parsed as well-formed XML.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let wrapped = format!("<tss-root>{input}</tss-root>");
        let mut reader = Reader::from_str(&wrapped);
        reader.config_mut().trim_text(false);

        let mut doc = Self::new();
        let root = doc.root();
        // The synthetic wrapper maps onto the document root itself.
        let mut stack: Vec<NodeId> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let current = stack.last().copied().unwrap_or(root);
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if stack.is_empty() && e.name().as_ref() == b"tss-root" {
                        stack.push(root);
                    } else {
                        let id = start_element(&mut doc, &reader, &e)?;
                        doc.append_child(current, id);
                        stack.push(id);
                    }
                }
                Event::Empty(e) => {
                    let id = start_element(&mut doc, &reader, &e)?;
                    doc.append_child(current, id);
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    append_text(&mut doc, current, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    append_text(&mut doc, current, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e);
                    append_text(&mut doc, current, &text);
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => return Ok(doc),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    /// Serialize the whole document (children of the root) to markup.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(1024);
        for &child in self.children(self.root()) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialize one node (and its subtree) to markup.
    #[must_use]
    pub fn serialize_node(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.text(id) {
            out.push_str(&escape_text(text));
            return;
        }
        let Some(tag) = self.tag(id) else {
            // Document node: serialize children only.
            for &child in self.children(id) {
                self.write_node(child, out);
            }
            return;
        };

        out.push('<');
        out.push_str(tag);
        for (key, value) in self.attrs(id) {
            let _ = write!(out, r#" {key}="{}""#, escape_attr(value));
        }

        if self.children(id).is_empty() {
            out.push_str(" />");
        } else {
            out.push('>');
            for &child in self.children(id) {
                self.write_node(child, out);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

/// Create a detached element from a start tag.
fn start_element<R: std::io::BufRead>(
    doc: &mut Document,
    reader: &Reader<R>,
    e: &BytesStart,
) -> Result<NodeId, DomError> {
    let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
    let id = doc.create_element(&tag);
    for attr in e.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        if key.starts_with("xmlns") {
            continue;
        }
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        doc.set_attr(id, &key, &value);
    }
    Ok(id)
}

/// Append text under `parent`, merging into a trailing text node.
fn append_text(doc: &mut Document, parent: NodeId, text: &str) {
    if let Some(&last) = doc.children(parent).last()
        && doc.is_text(last)
    {
        doc.push_text(last, text);
        return;
    }
    let id = doc.create_text(text);
    doc.append_child(parent, id);
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}

/// Escape text for XML content.
fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for XML attribute values.
fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

/// Escape XML special characters.
fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let doc = Document::parse("<p>Hello</p>").unwrap();
        let children = doc.children(doc.root());
        assert_eq!(children.len(), 1);
        let p = children[0];
        assert_eq!(doc.tag(p), Some("p"));
        assert_eq!(doc.text_content(p), "Hello");
    }

    #[test]
    fn test_parse_nested_elements() {
        let doc = Document::parse("<p><strong>Bold</strong> text</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.children(p).len(), 2);

        let strong = doc.children(p)[0];
        assert_eq!(doc.tag(strong), Some("strong"));
        assert_eq!(doc.text_content(strong), "Bold");

        let tail = doc.children(p)[1];
        assert_eq!(doc.text(tail), Some(" text"));
    }

    #[test]
    fn test_parse_attributes() {
        let doc = Document::parse(r#"<div class="x" transphporm="remove">a</div>"#).unwrap();
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.attr(div, "class"), Some("x"));
        assert_eq!(doc.role(div), Some(crate::NodeRole::Remove));
    }

    #[test]
    fn test_parse_self_closing() {
        let doc = Document::parse("<p>Before<br />After</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.children(p).len(), 3);
        assert_eq!(doc.tag(doc.children(p)[1]), Some("br"));
        assert_eq!(doc.text(doc.children(p)[2]), Some("After"));
    }

    #[test]
    fn test_parse_entities() {
        let doc = Document::parse("<p>a &lt; b &amp; c</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "a < b & c");
    }

    #[test]
    fn test_parse_multiple_top_level_nodes() {
        let doc = Document::parse("<h1>Title</h1><p>Body</p>").unwrap();
        assert_eq!(doc.children(doc.root()).len(), 2);
    }

    #[test]
    fn test_parse_malformed_is_an_error() {
        assert!(Document::parse("<p><b>oops</p>").is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let input = r#"<ul class="menu"><li>one</li><li>two</li></ul>"#;
        let doc = Document::parse(input).unwrap();
        assert_eq!(doc.serialize(), input);
    }

    #[test]
    fn test_serialize_self_closing() {
        let doc = Document::parse("<p>Before<br />After</p>").unwrap();
        assert_eq!(doc.serialize(), "<p>Before<br />After</p>");
    }

    #[test]
    fn test_serialize_escapes_text_and_attrs() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        let text = doc.create_text("a < b & c");
        doc.append_child(doc.root(), p);
        doc.append_child(p, text);
        doc.set_attr(p, "title", r#"say "hi""#);

        assert_eq!(
            doc.serialize(),
            r#"<p title="say &quot;hi&quot;">a &lt; b &amp; c</p>"#
        );
    }

    #[test]
    fn test_serialize_single_node() {
        let doc = Document::parse("<div><span>x</span></div>").unwrap();
        let div = doc.children(doc.root())[0];
        let span = doc.children(div)[0];
        assert_eq!(doc.serialize_node(span), "<span>x</span>");
    }
}
