/// IQR engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the single entry inside a serialized session state archive.
/// Part of the wire format; do not change.
pub const STATE_ARCHIVE_ENTRY: &str = "iqr_state.json";
