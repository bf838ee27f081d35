use crate::descriptor::Descriptor;
use crate::errors::SessionResult;

/// Nearest-neighbor index over a descriptor corpus.
///
/// The session engine only consumes item identity from the returned
/// neighbors; ordering and distances beyond that are the index's business.
pub trait INearestNeighbors: Send + Sync {
    /// Return up to `k` neighbors of `query`, nearest first.
    fn nearest(&self, query: &Descriptor, k: usize) -> SessionResult<Vec<Descriptor>>;
}
