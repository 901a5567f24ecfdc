//! Arena-backed mutable document.

use crate::node::{MARKER_ATTR, Node, NodeId, NodeKind, NodeRole};

/// A mutable document tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Detaching a
/// node (via [`remove`](Self::remove) or
/// [`clear_children`](Self::clear_children)) unlinks it from its parent
/// but keeps it in the arena, so ids held by the caller stay valid.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_owned(),
            attrs: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_owned()))
    }

    /// Whether `id` is an element node.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    /// Whether `id` is a text node.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Text(_))
    }

    /// The tag name of an element node.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// The content of a text node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn push_text(&mut self, id: NodeId, more: &str) {
        if let NodeKind::Text(text) = &mut self.nodes[id.0].kind {
            text.push_str(more);
        }
    }

    /// Get an attribute value. `None` for non-elements and absent names.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Set an attribute, overwriting any prior value. No-op on
    /// non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id.0].kind {
            if let Some(slot) = attrs.iter_mut().find(|(key, _)| key == name) {
                slot.1 = value.to_owned();
            } else {
                attrs.push((name.to_owned(), value.to_owned()));
            }
        }
    }

    /// Iterate an element's attributes in document order.
    pub(crate) fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    /// The node's role, read from the marker attribute.
    #[must_use]
    pub fn role(&self, id: NodeId) -> Option<NodeRole> {
        self.attr(id, MARKER_ATTR).and_then(NodeRole::from_marker)
    }

    /// Record a role on the node via the marker attribute.
    pub fn set_role(&mut self, id: NodeId, role: NodeRole) {
        self.set_attr(id, MARKER_ATTR, role.as_str());
    }

    /// The node's parent, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The node's children in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The sibling immediately before `id` under its parent.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|&sibling| sibling == id)?;
        pos.checked_sub(1).map(|i| siblings[i])
    }

    /// Append `child` as the last child of `parent`. The child must be
    /// detached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none(), "child already attached");
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `new` under `parent` immediately before `reference`. If
    /// `reference` is not a child of `parent`, `new` is appended. The
    /// new node must be detached.
    pub fn insert_before(&mut self, parent: NodeId, new: NodeId, reference: NodeId) {
        debug_assert!(self.nodes[new.0].parent.is_none(), "node already attached");
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|&sibling| sibling == reference)
            .unwrap_or(siblings.len());
        self.nodes[parent.0].children.insert(pos, new);
        self.nodes[new.0].parent = Some(parent);
    }

    /// Detach `id` (and its subtree) from its parent.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
    }

    /// Detach all children of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Deep-copy a node (and its subtree) from another document into this
    /// one. The copy is detached.
    pub fn import(&mut self, source: &Document, id: NodeId) -> NodeId {
        let new = self.push(source.nodes[id.0].kind.clone());
        for index in 0..source.nodes[id.0].children.len() {
            let child = source.nodes[id.0].children[index];
            let copy = self.import(source, child);
            self.append_child(new, copy);
        }
        new
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            _ => {
                for &child in &self.nodes[id.0].children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_and_query() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let text = doc.create_text("hi");
        doc.append_child(doc.root(), div);
        doc.append_child(div, text);

        assert!(doc.is_element(div));
        assert!(doc.is_text(text));
        assert_eq!(doc.tag(div), Some("div"));
        assert_eq!(doc.parent(text), Some(div));
        assert_eq!(doc.children(div), &[text]);
        assert_eq!(doc.text_content(div), "hi");
    }

    #[test]
    fn test_attributes_overwrite() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attr(div, "class", "a");
        doc.set_attr(div, "class", "b");
        assert_eq!(doc.attr(div, "class"), Some("b"));
        assert_eq!(doc.attr(div, "id"), None);
    }

    #[test]
    fn test_role_via_marker_attribute() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        assert_eq!(doc.role(div), None);

        doc.set_role(div, NodeRole::Remove);
        assert_eq!(doc.attr(div, MARKER_ATTR), Some("remove"));
        assert_eq!(doc.role(div), Some(NodeRole::Remove));

        doc.set_attr(div, MARKER_ATTR, "nonsense");
        assert_eq!(doc.role(div), None);
    }

    #[test]
    fn test_insert_before_and_prev_sibling() {
        let mut doc = Document::new();
        let ul = doc.create_element("ul");
        doc.append_child(doc.root(), ul);
        let a = doc.create_element("li");
        let c = doc.create_element("li");
        doc.append_child(ul, a);
        doc.append_child(ul, c);

        let b = doc.create_element("li");
        doc.insert_before(ul, b, c);
        assert_eq!(doc.children(ul), &[a, b, c]);
        assert_eq!(doc.prev_sibling(c), Some(b));
        assert_eq!(doc.prev_sibling(b), Some(a));
        assert_eq!(doc.prev_sibling(a), None);
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let span = doc.create_element("span");
        doc.append_child(doc.root(), div);
        doc.append_child(div, span);

        doc.remove(span);
        assert!(doc.children(div).is_empty());
        assert_eq!(doc.parent(span), None);
        // The id stays valid after detaching.
        assert_eq!(doc.tag(span), Some("span"));
    }

    #[test]
    fn test_clear_children() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let a = doc.create_text("a");
        let b = doc.create_text("b");
        doc.append_child(div, a);
        doc.append_child(div, b);

        doc.clear_children(div);
        assert!(doc.children(div).is_empty());
        assert_eq!(doc.parent(a), None);
    }

    #[test]
    fn test_import_deep_copies() {
        let mut source = Document::new();
        let ul = source.create_element("ul");
        let li = source.create_element("li");
        let text = source.create_text("item");
        source.append_child(source.root(), ul);
        source.append_child(ul, li);
        source.append_child(li, text);
        source.set_attr(li, "class", "x");

        let mut dest = Document::new();
        let copy = dest.import(&source, ul);
        assert_eq!(dest.parent(copy), None);
        assert_eq!(dest.tag(copy), Some("ul"));
        assert_eq!(dest.children(copy).len(), 1);
        let li_copy = dest.children(copy)[0];
        assert_eq!(dest.attr(li_copy, "class"), Some("x"));
        assert_eq!(dest.text_content(copy), "item");

        // Mutating the copy leaves the source untouched.
        dest.set_attr(li_copy, "class", "y");
        assert_eq!(source.attr(li, "class"), Some("x"));
    }
}
