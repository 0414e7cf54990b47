//! Error types for xmlsimple

use thiserror::Error;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    /// The document was rejected by the XML parser.
    #[error("XML parsing failed: {0}")]
    Parse(#[from] roxmltree::Error),

    /// A read of a key that does not exist on a container.
    #[error("no such member: '{0}'")]
    MissingMember(String),

    /// Reading the input source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching the document over HTTP failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
