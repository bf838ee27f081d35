//! Stub collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use iqr_core::{
    Descriptor, IDescriptorFactory, INearestNeighbors, IRankerFactory, IRelevancyRanker,
    SessionError, SessionResult,
};

pub const TYPE_TAG: &str = "stub";

pub fn desc(uuid: &str) -> Descriptor {
    Descriptor::new(TYPE_TAG, uuid)
}

pub fn desc_vec(uuid: &str, vector: Vec<f64>) -> Descriptor {
    Descriptor::with_vector(TYPE_TAG, uuid, vector)
}

/// Neighbor index stub: a fixed uuid → neighbors table plus a query
/// counter for asserting that consumed seeds are never re-queried.
pub struct StubNeighbors {
    neighbors: HashMap<String, Vec<Descriptor>>,
    pub queries: AtomicUsize,
}

impl StubNeighbors {
    pub fn new(table: &[(&str, &[&str])]) -> Self {
        let neighbors = table
            .iter()
            .map(|(seed, ns)| (seed.to_string(), ns.iter().map(|n| desc(n)).collect()))
            .collect();
        Self {
            neighbors,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl INearestNeighbors for StubNeighbors {
    fn nearest(&self, query: &Descriptor, k: usize) -> SessionResult<Vec<Descriptor>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .neighbors
            .get(&query.uuid)
            .map(|ns| ns.iter().take(k).cloned().collect())
            .unwrap_or_default())
    }
}

/// Neighbor index stub whose queries always fail, for exercising
/// collaborator error propagation.
pub struct FailingNeighbors;

impl INearestNeighbors for FailingNeighbors {
    fn nearest(&self, _query: &Descriptor, _k: usize) -> SessionResult<Vec<Descriptor>> {
        Err(SessionError::collaborator("neighbor index offline"))
    }
}

/// Ranker stub: scores built candidates from a fixed uuid → score table
/// (0.0 for uuids not in the table).
struct StubRanker {
    scores: HashMap<String, f64>,
    candidates: Vec<Descriptor>,
}

impl IRelevancyRanker for StubRanker {
    fn build(&mut self, candidates: &[Descriptor]) -> SessionResult<()> {
        self.candidates = candidates.to_vec();
        Ok(())
    }

    fn rank(
        &self,
        _positive: &HashSet<Descriptor>,
        _negative: &HashSet<Descriptor>,
    ) -> SessionResult<HashMap<Descriptor, f64>> {
        Ok(self
            .candidates
            .iter()
            .map(|d| (d.clone(), self.scores.get(&d.uuid).copied().unwrap_or(0.0)))
            .collect())
    }
}

/// Factory for [`StubRanker`]s; counts creations so tests can assert how
/// many full rebuilds happened.
pub struct StubRankerFactory {
    scores: HashMap<String, f64>,
    pub creates: AtomicUsize,
}

impl StubRankerFactory {
    pub fn new(table: &[(&str, f64)]) -> Self {
        Self {
            scores: table.iter().map(|(u, s)| (u.to_string(), *s)).collect(),
            creates: AtomicUsize::new(0),
        }
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

impl IRankerFactory for StubRankerFactory {
    fn create(&self) -> Box<dyn IRelevancyRanker> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Box::new(StubRanker {
            scores: self.scores.clone(),
            candidates: Vec::new(),
        })
    }
}

/// Descriptor factory stub for import: builds bare descriptors, except for
/// uuids preloaded with a vector (simulating storage-backed elements).
pub struct StubDescriptorFactory {
    preloaded: HashMap<String, Vec<f64>>,
}

impl StubDescriptorFactory {
    pub fn new() -> Self {
        Self {
            preloaded: HashMap::new(),
        }
    }

    pub fn with_preloaded(uuid: &str, vector: Vec<f64>) -> Self {
        let mut preloaded = HashMap::new();
        preloaded.insert(uuid.to_string(), vector);
        Self { preloaded }
    }
}

impl IDescriptorFactory for StubDescriptorFactory {
    fn build(&self, type_tag: &str, uuid: &str) -> SessionResult<Descriptor> {
        Ok(match self.preloaded.get(uuid) {
            Some(v) => Descriptor::with_vector(type_tag, uuid, v.clone()),
            None => Descriptor::new(type_tag, uuid),
        })
    }
}
