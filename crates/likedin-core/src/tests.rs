//! Orchestrator and URL-validation tests.

use super::*;
use async_trait::async_trait;
use likedin_browser::{
    BrowserError, BrowserSession, LikeRunner, Result as BrowserResult, SessionFactory,
};
use likedin_store::CookieStore;
use std::sync::Arc;

// ── URL validation ──────────────────────────────────────────────

#[test]
fn test_accepts_posts_url() {
    assert!(is_post_url("https://www.linkedin.com/posts/someone/abc123"));
}

#[test]
fn test_accepts_activity_url() {
    assert!(is_post_url(
        "https://www.linkedin.com/feed/update/urn:li:activity:123456"
    ));
}

#[test]
fn test_accepts_without_www_and_http() {
    assert!(is_post_url("http://linkedin.com/posts/jane-doe/update-1"));
}

#[test]
fn test_rejects_foreign_host() {
    assert!(!is_post_url("https://example.com/posts/x"));
}

#[test]
fn test_rejects_empty_and_garbage() {
    assert!(!is_post_url(""));
    assert!(!is_post_url("not a url"));
    assert!(!is_post_url("https://www.linkedin.com/in/someone"));
}

// ── Orchestrator ────────────────────────────────────────────────

/// Minimal fake browser seam: succeeds or fails the whole like sequence.
struct StubFactory {
    fail_with: Option<fn() -> BrowserError>,
}

#[async_trait]
impl SessionFactory for StubFactory {
    async fn launch(&self) -> BrowserResult<Box<dyn BrowserSession>> {
        Ok(Box::new(StubSession {
            fail_with: self.fail_with,
        }))
    }
}

struct StubSession {
    fail_with: Option<fn() -> BrowserError>,
}

#[async_trait]
impl BrowserSession for StubSession {
    async fn set_auth_cookie(&mut self, _: &str, _: &str, _: &str) -> BrowserResult<()> {
        Ok(())
    }
    async fn set_user_agent(&mut self, _: &str) -> BrowserResult<()> {
        Ok(())
    }
    async fn navigate(&mut self, _: &str) -> BrowserResult<()> {
        Ok(())
    }
    async fn click_by_label(&mut self, _: &str) -> BrowserResult<()> {
        match self.fail_with {
            Some(make_err) => Err(make_err()),
            None => Ok(()),
        }
    }
    async fn release(&mut self) {}
}

async fn orchestrator_with(fail_with: Option<fn() -> BrowserError>) -> Orchestrator {
    let store = Arc::new(CookieStore::in_memory("test-key"));
    store.initialize().await.unwrap();
    let runner = LikeRunner::new(Arc::new(StubFactory { fail_with }));
    Orchestrator::new(store, runner)
}

const POST_URL: &str = "https://www.linkedin.com/posts/someone/abc123";

#[tokio::test]
async fn test_link_command_valid_url() {
    let orchestrator = orchestrator_with(None).await;

    let outcome = orchestrator.handle_link_command(&format!("  {POST_URL}  "), "U1");
    assert_eq!(
        outcome,
        ShareOutcome::Share {
            url: POST_URL.to_string()
        }
    );
}

#[tokio::test]
async fn test_link_command_invalid_url() {
    let orchestrator = orchestrator_with(None).await;

    match orchestrator.handle_link_command("https://example.com/posts/x", "U1") {
        ShareOutcome::Invalid { message } => assert!(message.contains("valid LinkedIn")),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[tokio::test]
async fn test_like_without_cookie_names_remedy() {
    let orchestrator = orchestrator_with(None).await;

    match orchestrator.handle_like_action(POST_URL, "U1").await {
        LikeOutcome::NoCookie { message } => {
            assert!(message.contains("/set-linkedin-cookie"));
        }
        other => panic!("expected NoCookie, got {other:?}"),
    }
}

#[tokio::test]
async fn test_like_with_cookie_succeeds() {
    let orchestrator = orchestrator_with(None).await;
    orchestrator
        .handle_cookie_submission("my-cookie", "U1")
        .await;

    match orchestrator.handle_like_action(POST_URL, "U1").await {
        LikeOutcome::Liked { message } => assert!(message.contains("liked")),
        other => panic!("expected Liked, got {other:?}"),
    }
}

#[tokio::test]
async fn test_runner_failure_maps_to_generic_message() {
    let orchestrator =
        orchestrator_with(Some(|| BrowserError::ControlNotFound("React Like".into()))).await;
    orchestrator
        .handle_cookie_submission("my-cookie", "U1")
        .await;

    match orchestrator.handle_like_action(POST_URL, "U1").await {
        LikeOutcome::Failed { message } => {
            // one generic message, no internal error detail
            assert!(message.contains("try again"));
            assert!(!message.contains("React Like"));
            assert!(!message.contains("control"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_navigation_failure_same_generic_message() {
    let failed = orchestrator_with(Some(|| BrowserError::NavigationFailed("boom".into()))).await;
    failed.handle_cookie_submission("c", "U1").await;
    let nav = failed.handle_like_action(POST_URL, "U1").await;

    let missing =
        orchestrator_with(Some(|| BrowserError::ControlNotFound("React Like".into()))).await;
    missing.handle_cookie_submission("c", "U1").await;
    let ctl = missing.handle_like_action(POST_URL, "U1").await;

    // the orchestrator does not distinguish failure kinds to end users
    assert_eq!(nav.message(), ctl.message());
}

#[tokio::test]
async fn test_empty_cookie_submission_is_silent() {
    let orchestrator = orchestrator_with(None).await;

    assert!(orchestrator.handle_cookie_submission("", "U1").await.is_none());
    assert!(orchestrator
        .handle_cookie_submission("   ", "U1")
        .await
        .is_none());
}

#[tokio::test]
async fn test_cookie_submission_stores_and_confirms() {
    let orchestrator = orchestrator_with(None).await;

    match orchestrator.handle_cookie_submission("li_at-value", "U1").await {
        Some(CookieOutcome::Stored { message }) => assert!(message.contains("stored")),
        other => panic!("expected Stored, got {other:?}"),
    }
}
