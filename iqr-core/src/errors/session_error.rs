/// Session engine errors.
///
/// All variants are surfaced synchronously to the caller and never leave
/// session state partially mutated: preconditions are checked before any
/// mutation happens.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no positive descriptors to query the neighbor index with")]
    NoPositiveExamples,

    #[error("no relevancy ranker yet: the working set was never built")]
    NotInitialized,

    #[error("refinement requires at least one positive adjudication")]
    NoPositiveAdjudications,

    #[error("invalid state archive: {reason}")]
    InvalidStateArchive { reason: String },

    #[error("failed to write state archive: {reason}")]
    StateArchiveWrite { reason: String },

    #[error("stored vector for descriptor {uuid} does not match the factory-provided one")]
    VectorMismatch { uuid: String },

    #[error("collaborator failure: {reason}")]
    Collaborator { reason: String },
}

impl SessionError {
    /// Wrap an arbitrary collaborator failure (neighbor index, ranker,
    /// descriptor factory) in a `Collaborator` error.
    pub fn collaborator(err: impl std::fmt::Display) -> Self {
        Self::Collaborator {
            reason: err.to_string(),
        }
    }
}
