use crate::descriptor::Descriptor;
use crate::errors::SessionResult;

/// Constructs descriptor elements during session state import.
///
/// Implementations backed by persistent storage may return descriptors that
/// already carry a vector; the importer cross-checks those against the
/// archived values.
pub trait IDescriptorFactory {
    /// Build a descriptor for the given type tag and identifier.
    fn build(&self, type_tag: &str, uuid: &str) -> SessionResult<Descriptor>;
}
