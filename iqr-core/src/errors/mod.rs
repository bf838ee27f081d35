//! Error types for the IQR engine.

mod session_error;

pub use session_error::SessionError;

/// Convenience alias used across the workspace.
pub type SessionResult<T> = Result<T, SessionError>;
