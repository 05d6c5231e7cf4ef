//! Error types for the core crate.

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core systems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The scheduled task ID is invalid or has already completed.
    #[error("invalid or expired task ID")]
    InvalidTaskId,
}
