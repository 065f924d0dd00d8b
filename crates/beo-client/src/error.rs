use std::path::PathBuf;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the edit client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned an error response
    ///
    /// Displays as the endpoint's message alone so it can be shown to users.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error type identifier, when the endpoint sent one
        error_type: Option<String>,
        /// Human-readable error message
        message: String,
    },

    /// Source image could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse response
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
