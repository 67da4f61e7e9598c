//! Error types for answerkit.

use thiserror::Error;

/// Result type alias for answerkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while normalizing, rendering or delivering an answer.
///
/// Structural and size-driven fallbacks are resolved internally and never
/// appear here. Only [`Error::NoResultsFound`] and [`Error::Upload`] are
/// meant to reach the user.
#[derive(Error, Debug)]
pub enum Error {
    /// Upstream returned no usable structured content.
    #[error("No results found.")]
    NoResultsFound,

    /// The transport refused an inline send because it was too large.
    #[error("Transport rejected a {len} byte message (limit {limit})")]
    TransportRejected {
        /// Length of the rejected payload in bytes.
        len: usize,
        /// Limit the transport enforced.
        limit: usize,
    },

    /// The transport failed for a reason other than size.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The paste service is unreachable or answered with an error.
    #[error("Paste upload failed: {0}")]
    Upload(String),

    /// Image pagination failed.
    #[error("Image pager error: {0}")]
    Pager(String),

    /// Raw response could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error is a size rejection that may be escalated to a paste.
    pub fn is_transport_rejection(&self) -> bool {
        matches!(self, Error::TransportRejected { .. })
    }
}
