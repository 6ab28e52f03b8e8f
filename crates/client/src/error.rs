//! Fetch operation errors.

use thiserror::Error;

/// A boxed transport-level error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the orchestration loops.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Protocol-level failure: unsupported algorithm or hash mismatch.
    #[error(transparent)]
    Protocol(#[from] fetchurl_core::Error),

    /// A source answered with a non-200 status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The transport failed before any response body was produced.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// I/O failure while streaming the body into the destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A failure occurred after bytes already reached the destination.
    ///
    /// Terminal for the whole operation: retrying a different source would
    /// interleave content from two origins. The caller must truncate or
    /// recreate the destination before retrying the operation.
    #[error("partial write: {0}")]
    PartialWrite(#[source] Box<FetchError>),

    /// Every attempt was exhausted without success and without any
    /// tainting write. Carries the most recent underlying failure.
    #[error("all sources failed")]
    AllSourcesFailed {
        #[source]
        last: Option<Box<FetchError>>,
    },
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Per-attempt failure, tracking whether the destination was tainted.
pub(crate) struct AttemptError {
    pub(crate) error: FetchError,
    pub(crate) tainted: bool,
}

impl AttemptError {
    /// A failure that left the destination untouched.
    pub(crate) fn clean(error: FetchError) -> Self {
        Self {
            error,
            tainted: false,
        }
    }
}
