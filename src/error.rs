//! Error types for skindir.
//!
//! Uses thiserror for derive macros and provides user-actionable error
//! messages. Filesystem contention outcomes (someone else holds the lock, a
//! marker directory could not be created or removed) are routine results
//! here, not program faults: callers are expected to match on the variant and
//! decide whether to retry, report, or escalate.

use thiserror::Error;

/// Main error type for skindir operations.
#[derive(Error, Debug)]
pub enum SkinError {
    /// Skin name normalized to empty, or a path-dependent operation was
    /// called on a handle with no bound skin.
    #[error("invalid skin: {0}")]
    InvalidSkin(String),

    /// The lock retry deadline elapsed without acquiring the marker.
    #[error("unable to lock skin: {0}")]
    LockTimeout(String),

    /// Marker creation failed for a reason other than pre-existence
    /// (permissions, missing parent). Not retried.
    #[error("directory creation failed: {0}")]
    LockCreateFailed(String),

    /// Marker removal failed while the handle believed it held the lock.
    /// The handle stays locked to signal the inconsistency.
    #[error("unable to unlock skin: {0}")]
    LockReleaseFailed(String),

    /// Release was attempted without a held lock.
    #[error("release without a held lock: {0}")]
    NotLocked(String),

    /// Lock holder metadata could not be read or written.
    #[error("lock metadata error: {0}")]
    Metadata(String),

    /// The backing record store reported a failure. Passed through from the
    /// store implementation, not wrapped further.
    #[error("skin store error: {0}")]
    Store(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for skindir operations.
pub type Result<T> = std::result::Result<T, SkinError>;
