//! Engine error types.

use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum AutotagError {
    /// An allow/deny or topic pattern failed to compile.
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending configured pattern.
        pattern: String,
        /// The regex compiler's complaint.
        #[source]
        source: regex::Error,
    },

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] autotag_storage::StorageError),

    /// The tag registry rejected a call.
    #[error("Tag registry error: {0}")]
    Registry(String),
}
