//! LikedIn Store - Encrypted per-user cookie storage
//!
//! Persists one LinkedIn session cookie per Slack user id in a single
//! SQLite table, encrypted at rest with AES-256-GCM under a process-wide
//! key. The store has an explicit lifecycle: `initialize()` opens the
//! database and runs a write-read-delete self-test, `close()` releases it,
//! and any use outside that window fails with `StoreError::NotInitialized`.

#![forbid(unsafe_code)]

mod crypto;
mod error;
mod secure_string;
mod store;


pub use error::{Result, StoreError};
pub use secure_string::SecureString;
pub use store::{CookieStore, StoreConfig};
