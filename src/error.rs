//! Error types for the upload pipeline.

use thiserror::Error;

/// Failure of a single item. Recorded as the item's failure reason; never
/// stops the rest of the queue.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The selected file could not be read
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The storage request could not complete
    #[error("Failed to send request: {0}")]
    Network(#[from] reqwest::Error),

    /// The storage endpoint answered with a non-success status
    #[error("{0}")]
    Remote(String),

    /// The storage endpoint answered with something we cannot read
    #[error("Malformed response from storage endpoint: {0}")]
    MalformedResponse(String),
}

/// Why a long link could not be shortened. Always a soft failure.
#[derive(Error, Debug)]
pub enum ShortenError {
    #[error("Server Error: {0}")]
    Http(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unreadable shortener response: {0}")]
    Malformed(String),

    /// Reachable and well-formed, but the service declined
    #[error("Shortener rejected the link: {0}")]
    Rejected(String),
}

impl ShortenError {
    /// Whether the user should be alerted about this failure. A rejection is
    /// only logged.
    pub fn is_alertable(&self) -> bool {
        !matches!(self, ShortenError::Rejected(_))
    }
}
