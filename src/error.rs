//! Error types for the remote store boundary, feed clients, and local
//! mutations.
//!
//! Remote-I/O errors never propagate into the mutation or observer path;
//! the coordinator catches them at the boundary and logs.

/// Errors from the remote document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Sign-in or sign-out failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A document write failed.
    #[error("document write failed: {0}")]
    Write(String),

    /// Loading a document or keeping the subscription alive failed.
    #[error("document read failed: {0}")]
    Read(String),
}

/// Errors from the read-only feed clients.
///
/// Surfaced to the caller so the view can show a retry affordance.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Transport-level failure.
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The aggregator answered but reported a non-ok status.
    #[error("feed upstream error: {0}")]
    Upstream(String),

    /// The payload did not match the expected shape.
    #[error("malformed feed payload: {0}")]
    Parse(String),
}

/// Errors from local collection mutations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    /// An encoded merch image exceeds the document budget.
    #[error("encoded image is {bytes} bytes, max {max}")]
    ImageTooLarge { bytes: usize, max: usize },
}
