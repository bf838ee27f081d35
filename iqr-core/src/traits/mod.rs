//! Collaborator traits: the narrow seams the session engine depends on.

mod descriptor_factory;
mod neighbors;
mod ranker;

pub use descriptor_factory::IDescriptorFactory;
pub use neighbors::INearestNeighbors;
pub use ranker::{IRankerFactory, IRelevancyRanker};
