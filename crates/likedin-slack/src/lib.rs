//! LikedIn Slack - slack-morphism adapter
//!
//! Slack surface of the bot using the slack-morphism library with Socket
//! Mode: slash commands (`/likedin`, `/set-linkedin-cookie`), the
//! `like_linkedin` block action, and the `cookie_modal` view submission.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use likedin_core::Orchestrator;
use slack_morphism::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Slack API client and reply helpers.
pub mod api;
/// Error types.
pub mod error;
/// Socket Mode event handlers.
pub mod events;
/// Slack-specific message formatting (blocks, modal).
pub mod formatting;


pub use error::{Error, Result};

/// Slash command that shares a post link.
pub const COMMAND_LIKEDIN: &str = "/likedin";
/// Slash command that opens the cookie modal.
pub const COMMAND_SET_COOKIE: &str = "/set-linkedin-cookie";

/// Slack bot configuration
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot token (xoxb-...)
    pub bot_token: String,
    /// App token for Socket Mode (xapp-...)
    pub app_token: String,
    /// Signing secret for request verification
    pub signing_secret: String,
}

impl SlackConfig {
    /// Create from environment variables. All three values are required;
    /// any missing one is a fatal configuration error.
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("SLACK_BOT_TOKEN")
            .map_err(|_| Error::Config("SLACK_BOT_TOKEN not set".to_string()))?;

        let app_token = std::env::var("SLACK_APP_TOKEN")
            .map_err(|_| Error::Config("SLACK_APP_TOKEN not set".to_string()))?;

        let signing_secret = std::env::var("SLACK_SIGNING_SECRET")
            .map_err(|_| Error::Config("SLACK_SIGNING_SECRET not set".to_string()))?;

        Ok(Self {
            bot_token,
            app_token,
            signing_secret,
        })
    }

    /// Create with explicit tokens
    #[must_use]
    pub fn new(
        bot_token: impl Into<String>,
        app_token: impl Into<String>,
        signing_secret: impl Into<String>,
    ) -> Self {
        Self {
            bot_token: bot_token.into(),
            app_token: app_token.into(),
            signing_secret: signing_secret.into(),
        }
    }
}

/// Slack bot adapter with Socket Mode support
pub struct SlackAdapter {
    pub(crate) config: SlackConfig,
}

impl SlackAdapter {
    /// Create a new Slack adapter
    #[must_use]
    pub fn new(config: SlackConfig) -> Self {
        Self { config }
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = SlackConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Get the bot token
    pub(crate) fn bot_token(&self) -> SlackApiToken {
        SlackApiToken::new(self.config.bot_token.clone().into())
    }

    /// Get the app token (for Socket Mode)
    pub(crate) fn app_token(&self) -> SlackApiToken {
        SlackApiToken::new(self.config.app_token.clone().into())
    }

    /// Start the bot in Socket Mode with the given orchestrator.
    ///
    /// Verifies the bot token, connects to Slack via WebSocket, and routes
    /// command and interaction events to the orchestrator.
    pub async fn run(self: Arc<Self>, orchestrator: Arc<Orchestrator>) -> Result<()> {
        info!("Starting Slack adapter in Socket Mode");

        // Fail fast on a bad token before opening the socket
        self.verify_auth().await?;

        let connector = SlackClientHyperConnector::new()
            .map_err(|e| Error::Slack(format!("HTTP connector: {e}")))?;
        let client = Arc::new(SlackClient::new(connector));

        let callbacks = SlackSocketModeListenerCallbacks::new()
            .with_command_events(events::socket_mode_command_handler)
            .with_interaction_events(events::socket_mode_interaction_handler);

        let user_state = events::SocketModeState {
            adapter: self.clone(),
            orchestrator: orchestrator.clone(),
        };

        let listener_env = Arc::new(
            SlackClientEventsListenerEnvironment::new(client.clone()).with_user_state(user_state),
        );

        let listener = SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_env,
            callbacks,
        );

        let app_token = self.app_token();
        listener
            .listen_for(&app_token)
            .await
            .map_err(|e| Error::Slack(format!("Socket Mode listen: {e}")))?;

        info!("Socket Mode connected, serving events...");
        listener.serve().await;

        info!("Slack adapter shutdown complete");
        Ok(())
    }
}
