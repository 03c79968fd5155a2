//! Store error types

use thiserror::Error;

/// Cookie store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store used before `initialize()` or after `close()`
    #[error("store is not initialized")]
    NotInitialized,

    /// Stored ciphertext could not be decrypted under the current key
    #[error("stored cookie could not be decrypted")]
    DecryptionFailed,

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// SQLite error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Encryption failure while storing
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Startup write-read-delete verification failed
    #[error("store self-test failed: {0}")]
    SelfTest(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
