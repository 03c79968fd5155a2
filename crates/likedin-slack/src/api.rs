//! Reply helpers over the Slack Web API.
//!
//! Each helper opens its own short-lived session, so they can be called
//! from any spawned handler task without shared client state.

use crate::error::{Error, Result};
use crate::SlackAdapter;
use slack_morphism::prelude::*;
use tracing::{debug, info};

impl SlackAdapter {
    fn client(&self) -> Result<SlackHyperClient> {
        let connector = SlackClientHyperConnector::new()
            .map_err(|e| Error::Slack(format!("Failed to create HTTP connector: {e}")))?;
        Ok(SlackClient::new(connector))
    }

    /// Verify the bot token with `auth.test`. Used at startup so a bad
    /// token fails the process instead of the first reply.
    pub(crate) async fn verify_auth(&self) -> Result<()> {
        let client = self.client()?;
        let token = self.bot_token();
        let session = client.open_session(&token);

        let auth_response = session
            .auth_test()
            .await
            .map_err(|e| Error::Slack(format!("auth.test failed: {e}")))?;

        info!(bot_user_id = %auth_response.user_id, "Slack bot token verified");
        Ok(())
    }

    /// Send an ephemeral message, visible only to `user_id` in `channel_id`.
    pub async fn post_ephemeral(&self, channel_id: &str, user_id: &str, text: &str) -> Result<()> {
        let client = self.client()?;
        let token = self.bot_token();
        let session = client.open_session(&token);

        let request = SlackApiChatPostEphemeralRequest::new(
            channel_id.into(),
            user_id.into(),
            SlackMessageContent::new().with_text(text.to_string()),
        );

        session
            .chat_post_ephemeral(&request)
            .await
            .map_err(|e| Error::Slack(format!("Failed to send ephemeral message: {e}")))?;

        debug!(channel = %channel_id, user = %user_id, "ephemeral message sent");
        Ok(())
    }

    /// Send a direct message to a user.
    pub async fn post_dm(&self, user_id: &str, text: &str) -> Result<()> {
        let client = self.client()?;
        let token = self.bot_token();
        let session = client.open_session(&token);

        let request = SlackApiChatPostMessageRequest::new(
            user_id.into(),
            SlackMessageContent::new().with_text(text.to_string()),
        );

        session
            .chat_post_message(&request)
            .await
            .map_err(|e| Error::Slack(format!("Failed to send DM: {e}")))?;

        debug!(user = %user_id, "DM sent");
        Ok(())
    }

    /// Open the cookie-entry modal for the interaction's trigger id.
    pub async fn open_cookie_modal(&self, trigger_id: SlackTriggerId) -> Result<()> {
        let client = self.client()?;
        let token = self.bot_token();
        let session = client.open_session(&token);

        let request = SlackApiViewsOpenRequest::new(trigger_id, crate::formatting::cookie_modal());

        session
            .views_open(&request)
            .await
            .map_err(|e| Error::Slack(format!("Failed to open modal: {e}")))?;

        debug!("cookie modal opened");
        Ok(())
    }
}
