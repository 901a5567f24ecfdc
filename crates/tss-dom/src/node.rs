//! Node identity, kinds and marker roles.

/// Attribute used to record node provenance in serialized markup.
pub const MARKER_ATTR: &str = "transphporm";

/// Index of a node within its owning [`Document`](crate::Document).
///
/// Ids are only meaningful for the document that created them; nodes are
/// never reclaimed, so an id stays valid for the document's lifetime even
/// after the node is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// What a node is.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    /// The document root. Exactly one per document, never detached.
    Document,
    /// An element with a tag name and ordered attributes.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// A text node.
    Text(String),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Typed view of the [`MARKER_ATTR`] attribute value.
///
/// Roles record why a node is in the tree. `Text` and `Added` are only
/// ever produced by the engine's own materialization step, which is what
/// makes idempotent removal of previously inserted nodes possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Inert placeholder left behind by a replace operation; skipped by
    /// later evaluations.
    Remove,
    /// Subtree owned by a separately rendered template; exempt from
    /// mutation, as is everything below it.
    IncludedTemplate,
    /// Synthetic element wrapping a scalar value item.
    Text,
    /// Element deep-copied into the document from a value fragment.
    Added,
}

impl NodeRole {
    /// The literal attribute value for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::IncludedTemplate => "includedtemplate",
            Self::Text => "text",
            Self::Added => "added",
        }
    }

    /// Parse a marker attribute value. Unrecognized values have no role.
    #[must_use]
    pub fn from_marker(value: &str) -> Option<Self> {
        match value {
            "remove" => Some(Self::Remove),
            "includedtemplate" => Some(Self::IncludedTemplate),
            "text" => Some(Self::Text),
            "added" => Some(Self::Added),
            _ => None,
        }
    }

    /// Whether a node carrying this role was inserted by the engine's
    /// materialization step and may be removed on re-application.
    #[must_use]
    pub fn is_engine_inserted(self) -> bool {
        matches!(self, Self::Text | Self::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            NodeRole::Remove,
            NodeRole::IncludedTemplate,
            NodeRole::Text,
            NodeRole::Added,
        ] {
            assert_eq!(NodeRole::from_marker(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_unknown_marker_has_no_role() {
        assert_eq!(NodeRole::from_marker("sparkle"), None);
        assert_eq!(NodeRole::from_marker(""), None);
    }

    #[test]
    fn test_engine_inserted_roles() {
        assert!(NodeRole::Text.is_engine_inserted());
        assert!(NodeRole::Added.is_engine_inserted());
        assert!(!NodeRole::Remove.is_engine_inserted());
        assert!(!NodeRole::IncludedTemplate.is_engine_inserted());
    }
}
