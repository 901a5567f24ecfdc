//! The content effector: deciding whether and how a formatted value is
//! written into the document.

use std::cell::RefCell;
use std::rc::Rc;

use tss_dom::{Document, NodeId, NodeRole};

use crate::error::EffectError;
use crate::format::Formatter;
use crate::headers::Headers;
use crate::pseudo::{PseudoEffect, PseudoMatcher};
use crate::rules::{ContentMode, RuleSet};
use crate::value::{Value, concat_text};

/// Applies one rule's value to one target node.
///
/// Constructed once per render pass with the formatter pipeline and the
/// shared headers sink; [`run`](Self::run) is then invoked per
/// (node, rule) pair by the tree-walking driver, which serializes
/// evaluations. Each evaluation is strictly eligibility, then format,
/// then exactly one output strategy.
pub struct Content {
    formatter: Formatter,
    headers: Rc<RefCell<Headers>>,
}

impl Content {
    /// Create an effector for one render pass.
    #[must_use]
    pub fn new(formatter: Formatter, headers: Rc<RefCell<Headers>>) -> Self {
        Self { formatter, headers }
    }

    /// Apply `value` to `element` under `rules`.
    ///
    /// Ineligible nodes (inside an included template, or marked removed)
    /// are skipped without mutation. A pseudo-function, if any matches,
    /// short-circuits default content mutation.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::DetachedNode`] when a replace rule targets
    /// a node with no parent; that is a driver invariant violation, not
    /// a data problem.
    pub fn run(
        &self,
        doc: &mut Document,
        element: NodeId,
        value: Vec<Value>,
        rules: &RuleSet,
        matcher: &dyn PseudoMatcher,
    ) -> Result<(), EffectError> {
        if !should_run(doc, element) {
            tracing::debug!(tag = doc.tag(element).unwrap_or_default(), "Skipping ineligible node");
            return Ok(());
        }

        let value = self.formatter.format(value, rules);

        if let Some(effect) = PseudoEffect::resolve(matcher) {
            self.apply_pseudo(doc, element, &value, &effect);
            return Ok(());
        }

        remove_placeholder_children(doc, element);
        match rules.content_mode() {
            ContentMode::Replace => self.replace_content(doc, element, &value),
            ContentMode::Append => {
                append_children(doc, element, &value);
                Ok(())
            }
        }
    }

    fn apply_pseudo(
        &self,
        doc: &mut Document,
        element: NodeId,
        value: &[Value],
        effect: &PseudoEffect,
    ) {
        match effect {
            PseudoEffect::Attr(name) => {
                doc.set_attr(element, name, &concat_text(value));
            }
            PseudoEffect::Header(name) => {
                self.headers.borrow_mut().append(name, &concat_text(value));
            }
            PseudoEffect::Before => {
                // Anchor at the first pre-existing child so the value's
                // order is preserved in the inserted run.
                let anchor = doc.children(element).first().copied();
                let nodes: Vec<NodeId> = Materializer::new(doc, value).collect();
                for id in nodes {
                    match anchor {
                        Some(anchor) => doc.insert_before(element, id, anchor),
                        None => doc.append_child(element, id),
                    }
                }
            }
            PseudoEffect::After => append_children(doc, element, value),
        }
    }

    /// Insert the materialized value as siblings immediately before the
    /// target and turn the target into an inert placeholder.
    ///
    /// Undoes any previous run first: immediately preceding siblings
    /// carrying an engine-inserted role are this rule's earlier output
    /// and are removed before reinserting, so at most one live
    /// replacement set exists per target however often this executes.
    fn replace_content(
        &self,
        doc: &mut Document,
        element: NodeId,
        value: &[Value],
    ) -> Result<(), EffectError> {
        let parent = doc.parent(element).ok_or(EffectError::DetachedNode)?;

        let removed = remove_added(doc, element);
        let nodes: Vec<NodeId> = Materializer::new(doc, value).collect();
        let inserted = nodes.len();
        for id in nodes {
            doc.insert_before(parent, id, element);
        }
        doc.set_role(element, NodeRole::Remove);

        tracing::debug!(removed, inserted, "Replaced node content with siblings");
        Ok(())
    }
}

/// The eligibility gate: included-template chains and removed
/// placeholders are never mutated.
fn should_run(doc: &Document, element: NodeId) -> bool {
    if inside_included_template(doc, element) {
        return false;
    }
    doc.role(element) != Some(NodeRole::Remove)
}

/// Walk upward from `element` to the document root looking for an
/// included-template boundary.
fn inside_included_template(doc: &Document, element: NodeId) -> bool {
    let mut current = Some(element);
    while let Some(node) = current {
        if doc.role(node) == Some(NodeRole::IncludedTemplate) {
            return true;
        }
        current = doc.parent(node);
    }
    false
}

/// Remove the element's original placeholder content. Children the
/// engine materialized on an earlier run keep their place, so an append
/// rule accumulates across re-runs.
fn remove_placeholder_children(doc: &mut Document, element: NodeId) {
    let children: Vec<NodeId> = doc.children(element).to_vec();
    for child in children {
        if !doc.role(child).is_some_and(NodeRole::is_engine_inserted) {
            doc.remove(child);
        }
    }
}

/// Walk backward over immediately preceding siblings, removing every one
/// carrying an engine-inserted role and stopping at the first that does
/// not. Returns the number removed.
fn remove_added(doc: &mut Document, element: NodeId) -> usize {
    let mut removed = 0;
    while let Some(prev) = doc.prev_sibling(element) {
        if !doc.role(prev).is_some_and(NodeRole::is_engine_inserted) {
            break;
        }
        doc.remove(prev);
        removed += 1;
    }
    removed
}

fn append_children(doc: &mut Document, element: NodeId, value: &[Value]) {
    let nodes: Vec<NodeId> = Materializer::new(doc, value).collect();
    for id in nodes {
        doc.append_child(element, id);
    }
}

/// Finite, non-restartable producer of concrete nodes from value items.
///
/// Fragments with an element payload are deep-copy imported and tagged
/// [`NodeRole::Added`]; scalars (and fragments holding a raw text node)
/// are wrapped in a synthetic `<text>` element tagged [`NodeRole::Text`]
/// containing one text node, so every produced node is an element.
struct Materializer<'a, 'v> {
    doc: &'a mut Document,
    items: std::slice::Iter<'v, Value>,
}

impl<'a, 'v> Materializer<'a, 'v> {
    fn new(doc: &'a mut Document, value: &'v [Value]) -> Self {
        Self {
            doc,
            items: value.iter(),
        }
    }
}

impl Iterator for Materializer<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let item = self.items.next()?;
        Some(match item {
            Value::Fragment(frag) if !frag.is_text() => {
                let id = self.doc.import(frag.doc(), frag.node());
                self.doc.set_role(id, NodeRole::Added);
                id
            }
            scalar => {
                let wrapper = self.doc.create_element("text");
                let text = self.doc.create_text(&scalar.text_content());
                self.doc.append_child(wrapper, text);
                self.doc.set_role(wrapper, NodeRole::Text);
                wrapper
            }
        })
    }
}
