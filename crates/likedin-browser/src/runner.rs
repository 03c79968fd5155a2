//! LikeRunner — drives one like action through a browser session.

use crate::error::{BrowserError, Result};
use crate::session::{BrowserSession, SessionFactory};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Name of LinkedIn's session-authentication cookie.
const LINKEDIN_COOKIE_NAME: &str = "li_at";

/// Domain the session cookie is scoped to.
const LINKEDIN_COOKIE_DOMAIN: &str = "www.linkedin.com";

/// Accessible label of the like control on a LinkedIn post.
pub const LIKE_BUTTON_LABEL: &str = "React Like";

const DEFAULT_NAV_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Budget for the navigate-and-wait step. A hung navigation fails with
    /// `NavigationFailed` instead of blocking the handler forever.
    pub navigation_timeout: Duration,
    /// Client identifier presented to the remote site.
    pub user_agent: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(DEFAULT_NAV_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RunnerConfig {
    /// Create from environment variables, falling back to defaults.
    /// `LIKEDIN_NAV_TIMEOUT_SECS` overrides the navigation budget.
    #[must_use]
    pub fn from_env() -> Self {
        let navigation_timeout = std::env::var("LIKEDIN_NAV_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_NAV_TIMEOUT_SECS));

        Self {
            navigation_timeout,
            ..Self::default()
        }
    }
}

/// Performs like actions, one fresh browser session per call.
#[derive(Clone)]
pub struct LikeRunner {
    factory: Arc<dyn SessionFactory>,
    config: RunnerConfig,
}

impl LikeRunner {
    /// Create a runner with default configuration.
    #[must_use]
    pub fn new(factory: Arc<dyn SessionFactory>) -> Self {
        Self::with_config(factory, RunnerConfig::default())
    }

    /// Create a runner with explicit configuration.
    #[must_use]
    pub fn with_config(factory: Arc<dyn SessionFactory>, config: RunnerConfig) -> Self {
        Self { factory, config }
    }

    /// Like the post at `url` using the given session cookie.
    ///
    /// Launches an isolated session, authenticates via the cookie, navigates
    /// to the post, clicks the like control exactly once, and releases the
    /// session regardless of outcome. Errors from any step propagate typed.
    pub async fn perform_like(&self, url: &str, cookie: &str) -> Result<()> {
        let mut session = self.factory.launch().await?;

        let outcome = self.drive(session.as_mut(), url, cookie).await;

        // Teardown happens in every path, success or failure.
        session.release().await;

        if outcome.is_ok() {
            info!(url = %url, "post liked");
        }
        outcome
    }

    async fn drive(
        &self,
        session: &mut dyn BrowserSession,
        url: &str,
        cookie: &str,
    ) -> Result<()> {
        session
            .set_auth_cookie(LINKEDIN_COOKIE_NAME, cookie, LINKEDIN_COOKIE_DOMAIN)
            .await?;
        session.set_user_agent(&self.config.user_agent).await?;

        tokio::time::timeout(self.config.navigation_timeout, session.navigate(url))
            .await
            .map_err(|_| {
                BrowserError::NavigationFailed(format!(
                    "timed out after {}s",
                    self.config.navigation_timeout.as_secs()
                ))
            })??;

        debug!(url = %url, "page loaded, locating like control");
        session.click_by_label(LIKE_BUTTON_LABEL).await?;

        Ok(())
    }
}
