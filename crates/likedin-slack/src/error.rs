//! Error types for likedin-slack

use thiserror::Error;

/// Slack adapter error type
#[derive(Debug, Error)]
pub enum Error {
    /// Slack API or Socket Mode error
    #[error("slack error: {0}")]
    Slack(String),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
