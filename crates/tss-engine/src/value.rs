//! Value items flowing through the engine.

use tss_dom::Fragment;

/// One item of the ordered value sequence produced per rule evaluation.
///
/// Items are heterogeneous: scalars carry text or a number, fragments
/// carry an opaque previously-built sub-tree (whose payload may itself be
/// an element or a raw text node).
#[derive(Debug)]
pub enum Value {
    /// Scalar text.
    Text(String),
    /// Scalar number.
    Number(f64),
    /// A previously-built sub-tree.
    Fragment(Fragment),
}

impl Value {
    /// The item's text content: the scalar itself, or the concatenated
    /// text of a fragment's sub-tree.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::Fragment(frag) => frag.text_content(),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Fragment> for Value {
    fn from(frag: Fragment) -> Self {
        Self::Fragment(frag)
    }
}

/// Concatenated text content of a value sequence, with no separator.
pub(crate) fn concat_text(value: &[Value]) -> String {
    let mut out = String::new();
    for item in value {
        out.push_str(&item.text_content());
    }
    out
}
