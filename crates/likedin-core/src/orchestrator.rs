//! Orchestrator — validates commands, invokes the store and runner, and
//! composes every user-facing reply in the system.

use crate::links;
use likedin_browser::LikeRunner;
use likedin_store::CookieStore;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Command naming the remedy when a user has no stored cookie.
const SET_COOKIE_COMMAND: &str = "/set-linkedin-cookie";

/// Outcome of a `/likedin` link command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Valid post URL: broadcast it with an attached like control.
    Share {
        /// The validated post URL, carried as the control's payload.
        url: String,
    },
    /// Not a recognized post URL: reply privately, no broadcast.
    Invalid {
        /// Validation message for the requesting user only.
        message: String,
    },
}

/// Outcome of a like-button action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The like click went through.
    Liked { message: String },
    /// The user has never stored a cookie.
    NoCookie { message: String },
    /// The automated action failed; detail is in the log, not the message.
    Failed { message: String },
}

impl LikeOutcome {
    /// The private reply for the acting user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Liked { message } | Self::NoCookie { message } | Self::Failed { message } => {
                message
            }
        }
    }
}

/// Outcome of a cookie modal submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieOutcome {
    /// Cookie encrypted and stored.
    Stored { message: String },
    /// Storing failed; the user is asked to retry.
    StoreFailed { message: String },
}

impl CookieOutcome {
    /// The private confirmation/notice for the submitting user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Stored { message } | Self::StoreFailed { message } => message,
        }
    }
}

/// Routes chat events to the cookie store and the like runner.
pub struct Orchestrator {
    store: Arc<CookieStore>,
    runner: LikeRunner,
}

impl Orchestrator {
    /// Create an orchestrator over an initialized store and a runner.
    #[must_use]
    pub fn new(store: Arc<CookieStore>, runner: LikeRunner) -> Self {
        Self { store, runner }
    }

    /// Handle the `/likedin <url>` command: trim and validate the URL.
    pub fn handle_link_command(&self, raw_text: &str, user_id: &str) -> ShareOutcome {
        let url = raw_text.trim();

        if !links::is_post_url(url) {
            debug!(user_id = %user_id, "rejected link command with invalid URL");
            return ShareOutcome::Invalid {
                message: "Please provide a valid LinkedIn post URL.".to_string(),
            };
        }

        info!(user_id = %user_id, url = %url, "sharing LinkedIn post");
        ShareOutcome::Share {
            url: url.to_string(),
        }
    }

    /// Handle the `/set-linkedin-cookie` command. The credential itself
    /// arrives later through [`Orchestrator::handle_cookie_submission`];
    /// here the caller is told to open the single-field entry prompt.
    pub fn handle_set_cookie_command(&self, user_id: &str) {
        info!(user_id = %user_id, "opening cookie entry prompt");
    }

    /// Handle a like-button click: look up the user's cookie and run the
    /// automated like. Every runner failure collapses into one generic
    /// message; the specific kind goes to the operator log only.
    pub async fn handle_like_action(&self, url: &str, user_id: &str) -> LikeOutcome {
        let cookie = match self.store.get(user_id).await {
            Ok(Some(cookie)) => cookie,
            Ok(None) => {
                info!(user_id = %user_id, "like action without a stored cookie");
                return LikeOutcome::NoCookie {
                    message: format!(
                        "You haven't stored a LinkedIn cookie yet. \
                         Run {SET_COOKIE_COMMAND} to set one."
                    ),
                };
            }
            Err(e) => {
                error!(error = %e, user_id = %user_id, "cookie lookup failed");
                return LikeOutcome::Failed {
                    message: generic_like_failure(),
                };
            }
        };

        match self.runner.perform_like(url, cookie.expose()).await {
            Ok(()) => {
                info!(user_id = %user_id, url = %url, "like action succeeded");
                LikeOutcome::Liked {
                    message: "You successfully liked this post!".to_string(),
                }
            }
            Err(e) => {
                error!(error = %e, user_id = %user_id, url = %url, "like action failed");
                LikeOutcome::Failed {
                    message: generic_like_failure(),
                }
            }
        }
    }

    /// Handle the cookie modal submission. An empty field aborts silently
    /// (logged only); anything else is stored encrypted.
    pub async fn handle_cookie_submission(
        &self,
        field_value: &str,
        user_id: &str,
    ) -> Option<CookieOutcome> {
        let value = field_value.trim();
        if value.is_empty() {
            debug!(user_id = %user_id, "empty cookie submission ignored");
            return None;
        }

        match self.store.put(user_id, value).await {
            Ok(()) => {
                info!(user_id = %user_id, "cookie stored");
                Some(CookieOutcome::Stored {
                    message: "Your LinkedIn cookie has been successfully stored!".to_string(),
                })
            }
            Err(e) => {
                error!(error = %e, user_id = %user_id, "failed to store cookie");
                Some(CookieOutcome::StoreFailed {
                    message: "There was an error storing your LinkedIn cookie. Please try again."
                        .to_string(),
                })
            }
        }
    }
}

fn generic_like_failure() -> String {
    "There was an error liking the post. Please try again or check your cookie.".to_string()
}
