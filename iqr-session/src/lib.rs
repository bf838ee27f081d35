//! # iqr-session
//!
//! Session engine for interactive query refinement: a user adjudicates a
//! few exemplar descriptors as relevant or irrelevant, the engine expands a
//! working candidate pool via nearest-neighbor queries on the positive
//! seeds, a pluggable relevancy model ranks the pool, and cached
//! score-ordered views (positive / negative / unlabeled) update
//! incrementally as feedback accumulates.

pub mod controller;
pub mod ledger;
pub mod session;
pub mod state;
pub mod views;
pub mod working_set;

pub use controller::SessionController;
pub use ledger::{AdjudicationDelta, AdjudicationLedger};
pub use session::{IqrSession, SessionState};
pub use views::{RankSnapshot, ResultViews};
pub use working_set::WorkingSet;
