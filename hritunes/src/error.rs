//! Error types for the iTunes client

/// Result type alias for iTunes operations
pub type Result<T> = std::result::Result<T, ItunesError>;

/// Errors that can occur when searching the iTunes catalog
#[derive(Debug, thiserror::Error)]
pub enum ItunesError {
    /// The request was rejected before reaching the network
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The iTunes API answered with an error status
    #[error("iTunes returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ItunesError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}
