//! LikedIn Browser - Automated like-click runner
//!
//! Drives a headless Chrome session over the DevTools Protocol to like a
//! LinkedIn post on a user's behalf: inject the session cookie, navigate
//! to the post, click the "React Like" control, tear everything down.
//!
//! The browser is modeled as a capability interface ([`SessionFactory`] /
//! [`BrowserSession`]) so the runner can be exercised in tests without a
//! real browser engine.

#![forbid(unsafe_code)]

mod error;
mod runner;
mod session;

#[cfg(test)]
mod tests;

pub use error::{BrowserError, Result};
pub use runner::{LikeRunner, RunnerConfig, LIKE_BUTTON_LABEL};
pub use session::{BrowserSession, CdpSessionFactory, SessionFactory};
