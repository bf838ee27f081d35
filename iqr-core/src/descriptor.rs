use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A feature descriptor: a stable identifier, a type tag naming the
/// generator that produced it, and an optional numeric vector.
///
/// Identity (equality, hashing, ordering) is `(uuid, type_tag)` only.
/// The vector never participates — two descriptors for the same content
/// item are the same set member whether or not their vectors are loaded.
/// Vectors are compared element-wise only for integrity checks on import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    /// Stable identifier of the described content item.
    pub uuid: String,
    /// Name of the descriptor generator that produced the vector.
    pub type_tag: String,
    /// Feature vector. `None` until populated.
    vector: Option<Vec<f64>>,
}

impl Descriptor {
    /// Create a descriptor with no vector.
    pub fn new(type_tag: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            type_tag: type_tag.into(),
            vector: None,
        }
    }

    /// Create a descriptor with a populated vector.
    pub fn with_vector(
        type_tag: impl Into<String>,
        uuid: impl Into<String>,
        vector: Vec<f64>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            type_tag: type_tag.into(),
            vector: Some(vector),
        }
    }

    /// Whether a vector has been set.
    pub fn has_vector(&self) -> bool {
        self.vector.is_some()
    }

    /// The feature vector, if populated.
    pub fn vector(&self) -> Option<&[f64]> {
        self.vector.as_deref()
    }

    /// Set or replace the feature vector.
    pub fn set_vector(&mut self, values: Vec<f64>) {
        self.vector = Some(values);
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.type_tag == other.type_tag
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
        self.type_tag.hash(state);
    }
}

impl PartialOrd for Descriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Descriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid
            .cmp(&other.uuid)
            .then_with(|| self.type_tag.cmp(&other.type_tag))
    }
}
