//! Browser automation error types

use thiserror::Error;

/// Errors raised while performing an automated like action
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Browser process or page could not be started
    #[error("failed to launch browser session: {0}")]
    LaunchFailed(String),

    /// Navigation did not reach a loaded page within the budget
    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    /// The like control is absent from the page — most commonly an
    /// expired/invalid cookie or a URL that is not a likeable post
    #[error("control not found: {0}")]
    ControlNotFound(String),

    /// CDP command failure inside an otherwise healthy session
    #[error("browser session error: {0}")]
    Session(String),
}

/// Result type for browser operations
pub type Result<T> = std::result::Result<T, BrowserError>;
