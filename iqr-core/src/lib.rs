//! # iqr-core
//!
//! Foundation crate for the IQR (interactive query refinement) engine.
//! Defines the descriptor model, collaborator traits, errors, config, and
//! constants. The session crate depends on this.

pub mod config;
pub mod constants;
pub mod descriptor;
pub mod errors;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SessionConfig;
pub use descriptor::Descriptor;
pub use errors::{SessionError, SessionResult};
pub use traits::{IDescriptorFactory, INearestNeighbors, IRankerFactory, IRelevancyRanker};
