//! Session configuration.

mod session_config;

pub use session_config::SessionConfig;

/// Default values shared by config structs.
pub mod defaults {
    /// Neighbors pulled per positive seed when growing the working set.
    pub const DEFAULT_SEED_FANOUT: usize = 500;
}
