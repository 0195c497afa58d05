//! Content fetching error types.

/// Errors that can occur while fetching static content fragments. All of
/// them are non-fatal: callers fall back to placeholder strings.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Fragment does not exist on the server
    #[error("Content not found: {path}")]
    NotFound { path: String },

    /// Transport-level failure
    #[error("Content request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Manifest could not be parsed
    #[error("Invalid project manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    /// Generic content error
    #[error("Content error: {0}")]
    #[allow(dead_code)]
    Other(String),
}
