//! WorkingSet — the uuid-keyed candidate pool eligible for ranking.

use std::collections::HashMap;

use iqr_core::Descriptor;

/// Candidate descriptors gathered by neighbor expansion from positive
/// seeds. Strictly additive between session resets: inserts never evict
/// existing members, and re-inserting a known uuid is a no-op for size.
#[derive(Debug, Default, Clone)]
pub struct WorkingSet {
    members: HashMap<String, Descriptor>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-insert descriptors, keyed by uuid.
    pub fn add_many(&mut self, descriptors: impl IntoIterator<Item = Descriptor>) {
        for d in descriptors {
            self.members.insert(d.uuid.clone(), d);
        }
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.members.contains_key(uuid)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over all members.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.members.values()
    }

    /// Snapshot the members into a vector, e.g. for a ranker build.
    pub fn to_vec(&self) -> Vec<Descriptor> {
        self.members.values().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}
