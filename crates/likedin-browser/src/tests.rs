//! Runner tests against a fake browser session.

use super::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared counters observing session lifecycle across a test.
#[derive(Default)]
struct Counters {
    launches: AtomicUsize,
    releases: AtomicUsize,
    clicks: AtomicUsize,
    cookies_set: AtomicUsize,
}

#[derive(Clone, Copy)]
struct Behavior {
    has_control: bool,
    fail_navigation: bool,
    hang_navigation: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            has_control: true,
            fail_navigation: false,
            hang_navigation: false,
        }
    }
}

struct FakeFactory {
    counters: Arc<Counters>,
    behavior: Behavior,
}

impl FakeFactory {
    fn new(behavior: Behavior) -> (Self, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        (
            Self {
                counters: counters.clone(),
                behavior,
            },
            counters,
        )
    }
}

#[async_trait]
impl SessionFactory for FakeFactory {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            counters: self.counters.clone(),
            behavior: self.behavior,
        }))
    }
}

struct FakeSession {
    counters: Arc<Counters>,
    behavior: Behavior,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn set_auth_cookie(&mut self, name: &str, _value: &str, domain: &str) -> Result<()> {
        assert_eq!(name, "li_at");
        assert_eq!(domain, "www.linkedin.com");
        self.counters.cookies_set.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        assert!(user_agent.contains("Mozilla"));
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        if self.behavior.hang_navigation {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.behavior.fail_navigation {
            return Err(BrowserError::NavigationFailed(format!("no route to {url}")));
        }
        Ok(())
    }

    async fn click_by_label(&mut self, label: &str) -> Result<()> {
        if !self.behavior.has_control {
            return Err(BrowserError::ControlNotFound(label.to_string()));
        }
        self.counters.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn release(&mut self) {
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
    }
}

const POST_URL: &str = "https://www.linkedin.com/posts/someone/abc123";

#[tokio::test]
async fn test_like_success_clicks_exactly_once() {
    let (factory, counters) = FakeFactory::new(Behavior::default());
    let runner = LikeRunner::new(Arc::new(factory));

    runner.perform_like(POST_URL, "cookie").await.unwrap();

    assert_eq!(counters.clicks.load(Ordering::SeqCst), 1);
    assert_eq!(counters.cookies_set.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_control_raises_and_never_clicks() {
    let (factory, counters) = FakeFactory::new(Behavior {
        has_control: false,
        ..Behavior::default()
    });
    let runner = LikeRunner::new(Arc::new(factory));

    let err = runner.perform_like(POST_URL, "cookie").await.unwrap_err();
    assert!(matches!(err, BrowserError::ControlNotFound(_)));
    assert_eq!(counters.clicks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_release_matches_launch_on_success() {
    let (factory, counters) = FakeFactory::new(Behavior::default());
    let runner = LikeRunner::new(Arc::new(factory));

    runner.perform_like(POST_URL, "cookie").await.unwrap();

    assert_eq!(
        counters.launches.load(Ordering::SeqCst),
        counters.releases.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn test_release_matches_launch_on_missing_control() {
    let (factory, counters) = FakeFactory::new(Behavior {
        has_control: false,
        ..Behavior::default()
    });
    let runner = LikeRunner::new(Arc::new(factory));

    let _ = runner.perform_like(POST_URL, "cookie").await;

    assert_eq!(counters.launches.load(Ordering::SeqCst), 1);
    assert_eq!(counters.releases.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_release_matches_launch_on_navigation_failure() {
    let (factory, counters) = FakeFactory::new(Behavior {
        fail_navigation: true,
        ..Behavior::default()
    });
    let runner = LikeRunner::new(Arc::new(factory));

    let err = runner.perform_like(POST_URL, "cookie").await.unwrap_err();
    assert!(matches!(err, BrowserError::NavigationFailed(_)));
    assert_eq!(counters.launches.load(Ordering::SeqCst), 1);
    assert_eq!(counters.releases.load(Ordering::SeqCst), 1);
    assert_eq!(counters.clicks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_hung_navigation_hits_timeout_budget() {
    let (factory, counters) = FakeFactory::new(Behavior {
        hang_navigation: true,
        ..Behavior::default()
    });
    let runner = LikeRunner::with_config(
        Arc::new(factory),
        RunnerConfig {
            navigation_timeout: Duration::from_millis(50),
            ..RunnerConfig::default()
        },
    );

    let err = runner.perform_like(POST_URL, "cookie").await.unwrap_err();
    assert!(matches!(err, BrowserError::NavigationFailed(_)));
    assert_eq!(counters.releases.load(Ordering::SeqCst), 1);
    assert_eq!(counters.clicks.load(Ordering::SeqCst), 0);
}

#[test]
fn test_runner_config_from_env() {
    std::env::set_var("LIKEDIN_NAV_TIMEOUT_SECS", "5");
    let config = RunnerConfig::from_env();
    assert_eq!(config.navigation_timeout, Duration::from_secs(5));
    std::env::remove_var("LIKEDIN_NAV_TIMEOUT_SECS");

    let config = RunnerConfig::from_env();
    assert_eq!(config.navigation_timeout, Duration::from_secs(30));
}
