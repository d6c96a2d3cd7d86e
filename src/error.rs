//! Error types for rs-article-extract.
//!
//! Extraction itself never fails: strategies that find nothing simply yield no
//! candidate. These errors come from the collaborators around extraction
//! (network, live page snapshots, configuration loading) and are swallowed by
//! the escalator after being logged.

/// Error type for retrieval and configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// A URL could not be parsed or derived.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The live page could not produce a DOM snapshot.
    #[error("Page snapshot failed: {0}")]
    Snapshot(String),

    /// Configuration was rejected (e.g. negative keyword weight).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON payload could not be decoded.
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, Error>;
