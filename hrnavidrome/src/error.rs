//! Error types for the Navidrome client

/// Result type alias for Navidrome operations
pub type Result<T> = std::result::Result<T, NavidromeError>;

/// Subsonic error code for "requested data was not found"
pub const SUBSONIC_NOT_FOUND: u32 = 70;

/// Errors that can occur when talking to Navidrome
#[derive(Debug, thiserror::Error)]
pub enum NavidromeError {
    /// Base URL, username or password missing
    #[error("Navidrome configuration error: {0}")]
    Configuration(String),

    /// Navidrome answered with an error status or a failed Subsonic payload
    #[error("Navidrome returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Requested playlist or cover art does not exist
    #[error("Not found: {0}")]
    NotFound(String),

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

impl NavidromeError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Maps a non-success HTTP status
    pub fn from_status_code(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound(message.into()),
            _ => Self::Upstream {
                status,
                message: message.into(),
            },
        }
    }

    /// Maps a `status: "failed"` Subsonic payload received with HTTP `status`
    pub fn from_subsonic(status: u16, code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == SUBSONIC_NOT_FOUND {
            Self::NotFound(message)
        } else {
            Self::Upstream {
                status,
                message: format!("Subsonic error {}: {}", code, message),
            }
        }
    }
}
