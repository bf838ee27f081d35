//! IqrSession — concurrency-guarded aggregate of ledger, working set,
//! ranker, and result views.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use iqr_core::{
    Descriptor, INearestNeighbors, IRankerFactory, IRelevancyRanker, SessionConfig, SessionError,
    SessionResult,
};

use crate::ledger::AdjudicationLedger;
use crate::views::{RankSnapshot, ResultViews};
use crate::working_set::WorkingSet;

/// Everything mutable in a session, guarded by one mutex.
///
/// Internal operations take `&mut SessionState`, so a public entry point
/// locks exactly once and composition never re-acquires.
pub struct SessionState {
    pub(crate) ledger: AdjudicationLedger,
    pub(crate) working_set: WorkingSet,
    /// Positive-seed uuids already used to query the neighbor index.
    /// Each seed expands the working set at most once per session life.
    pub(crate) seeds_consumed: HashSet<String>,
    pub(crate) views: ResultViews,
    pub(crate) ranker: Option<Box<dyn IRelevancyRanker>>,
    pub(crate) last_activity: DateTime<Utc>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            ledger: AdjudicationLedger::new(),
            working_set: WorkingSet::new(),
            seeds_consumed: HashSet::new(),
            views: ResultViews::new(),
            ranker: None,
            last_activity: Utc::now(),
        }
    }

    /// The adjudication ledger.
    pub fn ledger(&self) -> &AdjudicationLedger {
        &self.ledger
    }

    /// The current working set.
    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    /// Positive-seed uuids already spent on neighbor queries.
    pub fn seeds_consumed(&self) -> &HashSet<String> {
        &self.seeds_consumed
    }

    /// Whether a ranker has been built since creation or the last reset.
    pub fn has_ranker(&self) -> bool {
        self.ranker.is_some()
    }

    /// Whether a refine has produced scores since creation or the last
    /// reset.
    pub fn has_scores(&self) -> bool {
        self.views.has_scores()
    }

    /// Back to the post-construction state: every set, cache, and the
    /// ranker gone.
    pub(crate) fn reset(&mut self) {
        self.ledger.clear();
        self.working_set.clear();
        self.seeds_consumed.clear();
        self.views.reset();
        self.ranker = None;
        self.last_activity = Utc::now();
    }
}

/// An interactive query refinement session.
///
/// All public operations serialize on one internal mutex; multi-field
/// reads and writes are atomic with respect to each other. There is no
/// reader/writer distinction. The only operation that does work outside
/// the lock is [`IqrSession::export_state`], which snapshots the ledger
/// under the lock and builds the archive after releasing it.
pub struct IqrSession {
    uuid: String,
    created_at: DateTime<Utc>,
    seed_fanout: usize,
    ranker_factory: Arc<dyn IRankerFactory>,
    state: Mutex<SessionState>,
}

impl IqrSession {
    /// Create a session with a generated uuid.
    pub fn new(config: &SessionConfig, ranker_factory: Arc<dyn IRankerFactory>) -> Self {
        Self::with_uuid(
            Uuid::new_v4().simple().to_string(),
            config,
            ranker_factory,
        )
    }

    /// Create a session with a caller-chosen uuid.
    pub fn with_uuid(
        uuid: impl Into<String>,
        config: &SessionConfig,
        ranker_factory: Arc<dyn IRankerFactory>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            created_at: Utc::now(),
            seed_fanout: config.seed_fanout,
            ranker_factory,
            state: Mutex::new(SessionState::new()),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn seed_fanout(&self) -> usize {
        self.seed_fanout
    }

    /// Run `f` with exclusive access to the session state. Acquires the
    /// lock, runs, and releases on every exit path.
    ///
    /// Mutations restore their invariants before returning, so a poisoned
    /// lock (a panic in a previous holder) is recovered rather than
    /// propagated.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Record relevance judgments on descriptors from external sources.
    /// These need not be working-set members; they only reach the ranked
    /// views through the snapshot taken at the next refine.
    pub fn add_external(&self, positive: &[Descriptor], negative: &[Descriptor]) {
        self.with_state(|s| {
            s.ledger.add_external(positive, negative);
            s.last_activity = Utc::now();
            debug!(
                session = %self.uuid,
                external_pos = s.ledger.external_positive.len(),
                external_neg = s.ledger.external_negative.len(),
                "recorded external adjudications"
            );
        });
    }

    /// Update working-set relevance judgments.
    ///
    /// A descriptor listed in both `new_pos` and `new_neg` cancels out.
    /// View caches whose backing set actually changed are dropped; calls
    /// that change nothing (re-adjudicating present items, all-empty
    /// arguments) leave every cache intact.
    pub fn adjudicate(
        &self,
        new_pos: &[Descriptor],
        new_neg: &[Descriptor],
        un_pos: &[Descriptor],
        un_neg: &[Descriptor],
    ) {
        self.with_state(|s| {
            let delta = s.ledger.adjudicate(new_pos, new_neg, un_pos, un_neg);
            s.views
                .invalidate_adjudicated(delta.positive_changed, delta.negative_changed);
            s.last_activity = Utc::now();
            debug!(
                session = %self.uuid,
                positive = s.ledger.positive.len(),
                negative = s.ledger.negative.len(),
                positive_changed = delta.positive_changed,
                negative_changed = delta.negative_changed,
                "adjudicated"
            );
        });
    }

    /// Grow the working set by querying the neighbor index once per
    /// not-yet-consumed positive seed, then rebuild the ranker over the
    /// whole pool if anything was added.
    ///
    /// Additive: existing members are never removed. A call with no new
    /// seeds is a strict no-op — zero neighbor queries, no ranker rebuild.
    pub fn update_working_set(&self, nn_index: &dyn INearestNeighbors) -> SessionResult<()> {
        self.with_state(|s| {
            let pool = s.ledger.positive_pool();
            if pool.is_empty() {
                return Err(SessionError::NoPositiveExamples);
            }

            info!(
                session = %self.uuid,
                positives = pool.len(),
                external = s.ledger.external_positive.len(),
                adjudicated = s.ledger.positive.len(),
                "expanding working set from positive seeds"
            );

            let mut updated = false;
            for seed in &pool {
                if s.seeds_consumed.contains(&seed.uuid) {
                    continue;
                }
                debug!(session = %self.uuid, seed = %seed.uuid, "querying neighbors");
                let neighbors = nn_index.nearest(seed, self.seed_fanout)?;
                s.working_set.add_many(neighbors);
                s.seeds_consumed.insert(seed.uuid.clone());
                updated = true;
            }

            if updated {
                // Rankers are rebuilt from scratch; they do not support
                // incremental index updates.
                info!(
                    session = %self.uuid,
                    working_set = s.working_set.len(),
                    "building new relevancy ranker over working set"
                );
                let mut ranker = self.ranker_factory.create();
                ranker.build(&s.working_set.to_vec())?;
                s.ranker = Some(ranker);
            }

            s.last_activity = Utc::now();
            Ok(())
        })
    }

    /// Re-rank the working set against the current adjudications.
    ///
    /// Replaces the score mapping wholesale, freezes the ledger into a new
    /// rank snapshot, and drops all four view caches.
    pub fn refine(&self) -> SessionResult<()> {
        self.with_state(|s| {
            let ranker = s.ranker.as_ref().ok_or(SessionError::NotInitialized)?;

            let pos = s.ledger.positive_pool();
            let neg = s.ledger.negative_pool();
            if pos.is_empty() {
                return Err(SessionError::NoPositiveAdjudications);
            }

            debug!(
                session = %self.uuid,
                positives = pos.len(),
                negatives = neg.len(),
                "ranking working set"
            );
            let scores = ranker.rank(&pos, &neg)?;

            s.views.install(scores, RankSnapshot::capture(&s.ledger));
            s.last_activity = Utc::now();
            Ok(())
        })
    }

    /// All scored descriptors as `(descriptor, score)`, highest first.
    /// Empty until the first refine.
    pub fn ordered_all(&self) -> Vec<(Descriptor, f64)> {
        self.with_state(|s| s.views.ordered_all())
    }

    /// Scored descriptors positively adjudicated as of the last refine,
    /// highest first.
    pub fn ordered_positive(&self) -> Vec<(Descriptor, f64)> {
        self.with_state(|s| s.views.ordered_positive())
    }

    /// Scored descriptors negatively adjudicated as of the last refine,
    /// highest first.
    pub fn ordered_negative(&self) -> Vec<(Descriptor, f64)> {
        self.with_state(|s| s.views.ordered_negative())
    }

    /// Scored descriptors unadjudicated as of the last refine, highest
    /// first.
    pub fn ordered_unlabeled(&self) -> Vec<(Descriptor, f64)> {
        self.with_state(|s| s.views.ordered_unlabeled())
    }

    /// Clear every ledger set, the working set, consumed seeds, scores,
    /// caches, and the ranker. The uuid, seed fanout, and ranker factory
    /// survive.
    pub fn reset(&self) {
        self.with_state(|s| {
            s.reset();
            info!(session = %self.uuid, "session reset");
        });
    }

    /// Duration since the last state-changing or view-reading operation.
    pub fn idle_duration(&self) -> chrono::Duration {
        self.with_state(|s| Utc::now() - s.last_activity)
    }
}

impl std::fmt::Debug for IqrSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IqrSession")
            .field("uuid", &self.uuid)
            .field("created_at", &self.created_at)
            .field("seed_fanout", &self.seed_fanout)
            .finish_non_exhaustive()
    }
}
