//! Browser session capability interface and its CDP implementation.

use crate::error::{BrowserError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// One isolated browser session: a private browser process and a single
/// page. Never shared across like actions.
#[async_trait]
pub trait BrowserSession: Send {
    /// Install an authentication cookie for the target site's domain.
    async fn set_auth_cookie(&mut self, name: &str, value: &str, domain: &str) -> Result<()>;

    /// Override the client identifier so the remote site sees ordinary
    /// browser traffic.
    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()>;

    /// Navigate and wait until the page is loaded and interactive.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Find the control with the given accessible label and click it once.
    /// Fails with [`BrowserError::ControlNotFound`] when absent.
    async fn click_by_label(&mut self, label: &str) -> Result<()>;

    /// Release all resources held by the session. Must be called in every
    /// path; errors during teardown are logged, not propagated.
    async fn release(&mut self);
}

/// Creates fresh, isolated sessions — one per like action.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Launch a new session.
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// Factory launching headless Chrome over the DevTools Protocol.
#[derive(Debug, Default)]
pub struct CdpSessionFactory;

impl CdpSessionFactory {
    /// Create a factory with the default headless configuration.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionFactory for CdpSessionFactory {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(1280, 720)
            .build()
            .map_err(BrowserError::LaunchFailed)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        // The handler task pumps CDP protocol messages; nothing else works
        // until it is running.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler event loop ended");
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "failed to close browser after page error");
                }
                handler_task.abort();
                return Err(BrowserError::LaunchFailed(e.to_string()));
            }
        };

        debug!("headless browser session launched");
        Ok(Box::new(CdpSession {
            browser,
            page,
            handler_task,
        }))
    }
}

/// A live chromiumoxide session.
struct CdpSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for CdpSession {
    async fn set_auth_cookie(&mut self, name: &str, value: &str, domain: &str) -> Result<()> {
        let cookie = CookieParam::builder()
            .name(name)
            .value(value)
            .domain(domain)
            .build()
            .map_err(BrowserError::Session)?;

        self.page
            .set_cookies(vec![cookie])
            .await
            .map_err(|e| BrowserError::Session(format!("set cookie: {e}")))?;
        Ok(())
    }

    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        self.page
            .set_user_agent(user_agent)
            .await
            .map_err(|e| BrowserError::Session(format!("set user agent: {e}")))?;
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;

        // Wait for the load event, not just the first response byte.
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;

        debug!(url = %url, "navigation complete");
        Ok(())
    }

    async fn click_by_label(&mut self, label: &str) -> Result<()> {
        let selector = format!("button[aria-label=\"{label}\"]");

        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::ControlNotFound(label.to_string()))?;

        element
            .click()
            .await
            .map_err(|e| BrowserError::Session(format!("click: {e}")))?;

        debug!(label = %label, "control clicked");
        Ok(())
    }

    async fn release(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "error while closing browser");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "error while waiting for browser exit");
        }
        self.handler_task.abort();
        debug!("browser session released");
    }
}
