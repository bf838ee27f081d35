//! AdjudicationLedger — the four mutually-exclusive relevance-judgment sets.

use std::collections::HashSet;

use iqr_core::Descriptor;

/// Which ledger sets an [`AdjudicationLedger::adjudicate`] call actually
/// changed, by set equality against the pre-call contents. Drives result
/// view cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjudicationDelta {
    pub positive_changed: bool,
    pub negative_changed: bool,
}

impl AdjudicationDelta {
    pub fn any_changed(&self) -> bool {
        self.positive_changed || self.negative_changed
    }
}

/// Relevance judgments accumulated over a session.
///
/// `positive`/`negative` hold judgments on working-set members;
/// `external_positive`/`external_negative` hold judgments on descriptors
/// supplied out-of-band, which need not be in the working set.
///
/// Invariants, restored after every mutation:
/// `positive ∩ negative = ∅` and `external_positive ∩ external_negative = ∅`.
#[derive(Debug, Default, Clone)]
pub struct AdjudicationLedger {
    pub positive: HashSet<Descriptor>,
    pub negative: HashSet<Descriptor>,
    pub external_positive: HashSet<Descriptor>,
    pub external_negative: HashSet<Descriptor>,
}

impl AdjudicationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record judgments on descriptors from external sources.
    ///
    /// An item newly placed in one external set is removed from the other,
    /// so the mutual-exclusion invariant holds. Idempotent for items
    /// already present.
    pub fn add_external(&mut self, positive: &[Descriptor], negative: &[Descriptor]) {
        self.external_positive.extend(positive.iter().cloned());
        for d in negative {
            self.external_positive.remove(d);
        }

        self.external_negative.extend(negative.iter().cloned());
        for d in positive {
            self.external_negative.remove(d);
        }
    }

    /// Update working-set judgments.
    ///
    /// The resulting positive set is `(positive ∪ new_pos) − un_pos − new_neg`,
    /// symmetrically for negative. An item listed in both `new_pos` and
    /// `new_neg` cancels out and lands in neither set.
    ///
    /// Returns which sets actually changed, compared against the pre-call
    /// contents. Re-adjudicating an already-present item reports no change.
    pub fn adjudicate(
        &mut self,
        new_pos: &[Descriptor],
        new_neg: &[Descriptor],
        un_pos: &[Descriptor],
        un_neg: &[Descriptor],
    ) -> AdjudicationDelta {
        let pos_before = self.positive.clone();
        self.positive.extend(new_pos.iter().cloned());
        for d in un_pos {
            self.positive.remove(d);
        }
        for d in new_neg {
            self.positive.remove(d);
        }
        let positive_changed = pos_before != self.positive;

        let neg_before = self.negative.clone();
        self.negative.extend(new_neg.iter().cloned());
        for d in un_neg {
            self.negative.remove(d);
        }
        for d in new_pos {
            self.negative.remove(d);
        }
        let negative_changed = neg_before != self.negative;

        AdjudicationDelta {
            positive_changed,
            negative_changed,
        }
    }

    /// All positive exemplars: working-set judgments plus external ones.
    pub fn positive_pool(&self) -> HashSet<Descriptor> {
        self.positive.union(&self.external_positive).cloned().collect()
    }

    /// All negative exemplars: working-set judgments plus external ones.
    pub fn negative_pool(&self) -> HashSet<Descriptor> {
        self.negative.union(&self.external_negative).cloned().collect()
    }

    /// Empty every set.
    pub fn clear(&mut self) {
        self.positive.clear();
        self.negative.clear();
        self.external_positive.clear();
        self.external_negative.clear();
    }
}
