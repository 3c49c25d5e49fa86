use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A named vertex identity.
///
/// Equality, ordering and hashing use the label only, so two `Vertex`
/// values built from the same label are interchangeable. The label is
/// immutable and shared, which makes clones cheap: graphs store and hand
/// out clones rather than references into their own storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    label: Arc<str>,
}

impl Vertex {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<&str> for Vertex {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Vertex {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

// Hash of a single-field struct is the hash of that field, so lookups by
// `&str` agree with lookups by `Vertex`.
impl Borrow<str> for Vertex {
    fn borrow(&self) -> &str {
        &self.label
    }
}
