//! Owned, detached sub-trees used as value items.

use crate::document::Document;
use crate::error::DomError;
use crate::node::NodeId;

/// A previously-built sub-tree, owned independently of any target
/// document.
///
/// A fragment carries its own [`Document`] and the id of a single payload
/// node (an element or a raw text node). Writing a fragment into a target
/// document goes through [`Document::import`], which deep-copies across
/// the ownership boundary.
#[derive(Debug)]
pub struct Fragment {
    doc: Document,
    node: NodeId,
}

impl Fragment {
    /// Build a fragment from markup. The payload is the first top-level
    /// node.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed markup or empty input.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let doc = Document::parse(input)?;
        let node = doc
            .children(doc.root())
            .first()
            .copied()
            .ok_or(DomError::EmptyFragment)?;
        Ok(Self { doc, node })
    }

    /// Build a fragment holding a raw text node.
    #[must_use]
    pub fn text(content: &str) -> Self {
        let mut doc = Document::new();
        let node = doc.create_text(content);
        let root = doc.root();
        doc.append_child(root, node);
        Self { doc, node }
    }

    /// The owning document.
    #[must_use]
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// The payload node id within [`Self::doc`].
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether the payload is a raw text node rather than an element.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.doc.is_text(self.node)
    }

    /// Concatenated text of the payload sub-tree.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.doc.text_content(self.node)
    }
}
