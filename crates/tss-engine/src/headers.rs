//! The shared headers sink.

/// Ordered (name, value) pairs collected across one document render.
///
/// One instance is shared (via `Rc<RefCell<Headers>>`) by every
/// [`Content`](crate::Content) constructed for a render pass. The engine
/// only appends; the surrounding render pass reads the pairs after all
/// nodes are processed.
#[derive(Debug, Default)]
pub struct Headers {
    pairs: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a (name, value) pair. Existing pairs are never replaced.
    pub fn append(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_owned(), value.to_owned()));
    }

    /// Iterate pairs in append order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of collected pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Consume the sink, yielding the collected pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
