//! RankSnapshot + ResultViews — cached, score-ordered partitions of the
//! last refinement's score mapping.

use std::collections::{HashMap, HashSet};

use iqr_core::Descriptor;

use crate::ledger::AdjudicationLedger;

/// Frozen copies of the four adjudication sets, taken at the moment of the
/// last refine. Views classify against these, not the live ledger, so they
/// stay coherent with the scores even while the ledger keeps mutating
/// between refines.
#[derive(Debug, Default, Clone)]
pub struct RankSnapshot {
    pub positive: HashSet<Descriptor>,
    pub positive_external: HashSet<Descriptor>,
    pub negative: HashSet<Descriptor>,
    pub negative_external: HashSet<Descriptor>,
}

impl RankSnapshot {
    /// Capture the current ledger contents.
    pub fn capture(ledger: &AdjudicationLedger) -> Self {
        Self {
            positive: ledger.positive.clone(),
            positive_external: ledger.external_positive.clone(),
            negative: ledger.negative.clone(),
            negative_external: ledger.external_negative.clone(),
        }
    }

    fn contains_positive(&self, d: &Descriptor) -> bool {
        self.positive.contains(d) || self.positive_external.contains(d)
    }

    fn contains_negative(&self, d: &Descriptor) -> bool {
        self.negative.contains(d) || self.negative_external.contains(d)
    }

    fn contains_any(&self, d: &Descriptor) -> bool {
        self.contains_positive(d) || self.contains_negative(d)
    }

    pub fn clear(&mut self) {
        self.positive.clear();
        self.positive_external.clear();
        self.negative.clear();
        self.negative_external.clear();
    }
}

/// The score mapping from the last refine plus four lazily computed,
/// score-descending view caches over it.
///
/// `None` means "not yet computed", never "empty result" — an empty result
/// is a cached `Some(vec![])`. The one exception: while no refine has
/// happened (`scores` is `None`), `ordered_all` returns an uncached empty
/// vector each call.
#[derive(Debug, Default)]
pub struct ResultViews {
    /// Wholesale-replaced by each refine. `None` until the first one.
    scores: Option<HashMap<Descriptor, f64>>,
    /// Ledger contents frozen at the last refine.
    snapshot: RankSnapshot,
    all: Option<Vec<(Descriptor, f64)>>,
    positive: Option<Vec<(Descriptor, f64)>>,
    negative: Option<Vec<(Descriptor, f64)>>,
    unlabeled: Option<Vec<(Descriptor, f64)>>,
}

impl ResultViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refine has produced scores since creation or last reset.
    pub fn has_scores(&self) -> bool {
        self.scores.is_some()
    }

    /// Install a fresh score mapping and ledger snapshot, dropping all four
    /// caches. Called by refine.
    pub fn install(&mut self, scores: HashMap<Descriptor, f64>, snapshot: RankSnapshot) {
        self.scores = Some(scores);
        self.snapshot = snapshot;
        self.all = None;
        self.positive = None;
        self.negative = None;
        self.unlabeled = None;
    }

    /// Drop the caches that depend on working-set adjudications. Called
    /// when an adjudicate call actually changed the corresponding sets.
    pub fn invalidate_adjudicated(&mut self, positive_changed: bool, negative_changed: bool) {
        if positive_changed {
            self.positive = None;
        }
        if negative_changed {
            self.negative = None;
        }
        if positive_changed || negative_changed {
            self.unlabeled = None;
        }
    }

    /// Everything back to the pre-first-refine state.
    pub fn reset(&mut self) {
        self.scores = None;
        self.snapshot.clear();
        self.all = None;
        self.positive = None;
        self.negative = None;
        self.unlabeled = None;
    }

    /// All scored descriptors, highest score first. Ties break by
    /// ascending uuid so the ordering is deterministic across runs.
    pub fn ordered_all(&mut self) -> Vec<(Descriptor, f64)> {
        if let Some(cached) = &self.all {
            return cached.clone();
        }
        let Some(scores) = &self.scores else {
            // No refine yet: empty, and deliberately not cached.
            return Vec::new();
        };
        let mut ordered: Vec<(Descriptor, f64)> =
            scores.iter().map(|(d, s)| (d.clone(), *s)).collect();
        ordered.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        self.all = Some(ordered.clone());
        ordered
    }

    /// Scored descriptors that were positively adjudicated as of the last
    /// refine (working-set or external), highest score first.
    pub fn ordered_positive(&mut self) -> Vec<(Descriptor, f64)> {
        if let Some(cached) = &self.positive {
            return cached.clone();
        }
        let filtered: Vec<(Descriptor, f64)> = self
            .ordered_all()
            .into_iter()
            .filter(|(d, _)| self.snapshot.contains_positive(d))
            .collect();
        self.positive = Some(filtered.clone());
        filtered
    }

    /// Scored descriptors that were negatively adjudicated as of the last
    /// refine, highest score first.
    pub fn ordered_negative(&mut self) -> Vec<(Descriptor, f64)> {
        if let Some(cached) = &self.negative {
            return cached.clone();
        }
        let filtered: Vec<(Descriptor, f64)> = self
            .ordered_all()
            .into_iter()
            .filter(|(d, _)| self.snapshot.contains_negative(d))
            .collect();
        self.negative = Some(filtered.clone());
        filtered
    }

    /// Scored descriptors in none of the four snapshot sets, highest score
    /// first.
    pub fn ordered_unlabeled(&mut self) -> Vec<(Descriptor, f64)> {
        if let Some(cached) = &self.unlabeled {
            return cached.clone();
        }
        let filtered: Vec<(Descriptor, f64)> = self
            .ordered_all()
            .into_iter()
            .filter(|(d, _)| !self.snapshot.contains_any(d))
            .collect();
        self.unlabeled = Some(filtered.clone());
        filtered
    }
}
