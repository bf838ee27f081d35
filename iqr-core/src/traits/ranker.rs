use std::collections::{HashMap, HashSet};

use crate::descriptor::Descriptor;
use crate::errors::SessionResult;

/// Relevancy ranking model over a candidate descriptor pool.
///
/// Rankers do not support incremental updates: when the candidate pool
/// grows, the session constructs a fresh instance via [`IRankerFactory`]
/// and rebuilds from scratch.
pub trait IRelevancyRanker: Send {
    /// Build the model's internal index over the full candidate pool.
    fn build(&mut self, candidates: &[Descriptor]) -> SessionResult<()>;

    /// Score candidates given positive and negative exemplars.
    ///
    /// The mapping domain is model-defined (typically the built candidate
    /// pool). Score scale is model-defined; the only contract is that a
    /// higher score means more relevant.
    fn rank(
        &self,
        positive: &HashSet<Descriptor>,
        negative: &HashSet<Descriptor>,
    ) -> SessionResult<HashMap<Descriptor, f64>>;
}

/// Configuration-driven constructor for [`IRelevancyRanker`] instances.
///
/// A session holds one factory for its whole life; every working-set
/// growth produces a fresh ranker from it.
pub trait IRankerFactory: Send + Sync {
    /// Construct a new, unbuilt ranker instance.
    fn create(&self) -> Box<dyn IRelevancyRanker>;
}
