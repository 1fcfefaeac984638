//! Label decoding: model output index to class name.

use crate::error::ClassifierError;

/// Ordered class names from `labels.json`.
///
/// Position in the list is the model's output index, so decoding is a plain
/// lookup. Guaranteed non-empty by construction.
#[derive(Debug, Clone)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    /// Wrap an ordered list of class names. Rejects an empty list.
    pub fn new(names: Vec<String>) -> Result<Self, ClassifierError> {
        if names.is_empty() {
            return Err(ClassifierError::EmptyLabelSet);
        }
        Ok(Self { names })
    }

    /// Class name at a model output index.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|s| s.as_str())
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All class names in output order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
