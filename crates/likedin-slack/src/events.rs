//! Socket Mode event handlers: slash commands, block actions, view
//! submissions.
//!
//! Interaction handlers never await the like/store flows: the envelope ack
//! goes out when the handler returns, and the actual work runs in a spawned
//! task that replies when done.

use crate::formatting;
use crate::{SlackAdapter, COMMAND_LIKEDIN, COMMAND_SET_COOKIE};
use likedin_core::{Orchestrator, ShareOutcome};
use slack_morphism::prelude::*;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Shared state passed to Socket Mode callbacks via user state.
pub(crate) struct SocketModeState {
    pub(crate) adapter: Arc<SlackAdapter>,
    pub(crate) orchestrator: Arc<Orchestrator>,
}

/// Socket Mode slash-command handler (plain function, no captures).
pub(crate) async fn socket_mode_command_handler(
    event: SlackCommandEvent,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> std::result::Result<SlackCommandEventResponse, Box<dyn std::error::Error + Send + Sync>> {
    let state_guard = states.read().await;
    let Some(state) = state_guard.get_user_state::<SocketModeState>() else {
        warn!("SocketModeState not found in user state");
        return Ok(SlackCommandEventResponse::new(SlackMessageContent::new()));
    };

    let command = event.command.to_string();
    match command.as_str() {
        COMMAND_LIKEDIN => Ok(handle_link_command(state, &event)),
        COMMAND_SET_COOKIE => Ok(handle_set_cookie_command(state, &event).await),
        other => {
            debug!(command = %other, "Unhandled Slack command, ignoring");
            Ok(SlackCommandEventResponse::new(SlackMessageContent::new()))
        }
    }
}

/// Handle `/likedin <url>`: validate and either reply ephemerally with the
/// validation error or broadcast the share message with its like button.
fn handle_link_command(
    state: &SocketModeState,
    event: &SlackCommandEvent,
) -> SlackCommandEventResponse {
    let text = event.text.clone().unwrap_or_default();
    let user_id = event.user_id.to_string();

    match state.orchestrator.handle_link_command(&text, &user_id) {
        ShareOutcome::Invalid { message } => {
            // Default command response type is ephemeral: only the
            // requesting user sees the validation error.
            SlackCommandEventResponse::new(SlackMessageContent::new().with_text(message))
        }
        ShareOutcome::Share { url } => SlackCommandEventResponse::new(
            SlackMessageContent::new()
                .with_text(formatting::share_fallback_text(&url, &user_id))
                .with_blocks(formatting::share_blocks(&url, &user_id)),
        )
        .with_response_type(SlackMessageResponseType::InChannel),
    }
}

/// Handle `/set-linkedin-cookie`: open the cookie modal.
async fn handle_set_cookie_command(
    state: &SocketModeState,
    event: &SlackCommandEvent,
) -> SlackCommandEventResponse {
    state
        .orchestrator
        .handle_set_cookie_command(&event.user_id.to_string());

    if let Err(e) = state
        .adapter
        .open_cookie_modal(event.trigger_id.clone())
        .await
    {
        error!(error = %e, user_id = %event.user_id, "Failed to open cookie modal");
    }
    SlackCommandEventResponse::new(SlackMessageContent::new())
}

/// Socket Mode interaction event handler (button clicks, view submissions).
pub(crate) async fn socket_mode_interaction_handler(
    event: SlackInteractionEvent,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state_guard = states.read().await;
    let Some(state) = state_guard.get_user_state::<SocketModeState>() else {
        warn!("SocketModeState not found in user state");
        return Ok(());
    };

    match event {
        SlackInteractionEvent::BlockActions(action_event) => {
            handle_block_actions(state, action_event);
        }
        SlackInteractionEvent::ViewSubmission(view_event) => {
            handle_view_submission(state, view_event);
        }
        _ => {
            debug!("Unhandled Slack interaction type, ignoring");
        }
    }

    Ok(())
}

/// Handle like-button clicks. Spawns the like flow so the envelope is
/// acked before any reply is sent.
fn handle_block_actions(state: &SocketModeState, event: SlackInteractionBlockActionsEvent) {
    let actions = match event.actions {
        Some(actions) if !actions.is_empty() => actions,
        _ => return,
    };

    let Some(user_id) = event.user.as_ref().map(|u| u.id.to_string()) else {
        warn!("Block action without a user, ignoring");
        return;
    };
    let Some(channel_id) = event.channel.as_ref().map(|c| c.id.to_string()) else {
        warn!("Block action without a channel, ignoring");
        return;
    };

    for action in actions {
        let action_id = action.action_id.to_string();
        if action_id != formatting::ACTION_LIKE_LINKEDIN {
            debug!(action_id = %action_id, "Unhandled block action, ignoring");
            continue;
        }

        let Some(url) = action.value.clone() else {
            warn!(user = %user_id, "Like action carries no URL payload, ignoring");
            continue;
        };

        debug!(
            user = %user_id,
            channel = %channel_id,
            url = %url,
            "Processing like action"
        );

        let adapter = state.adapter.clone();
        let orchestrator = state.orchestrator.clone();
        let user = user_id.clone();
        let channel = channel_id.clone();
        tokio::spawn(async move {
            let outcome = orchestrator.handle_like_action(&url, &user).await;
            if let Err(e) = adapter
                .post_ephemeral(&channel, &user, outcome.message())
                .await
            {
                error!(error = %e, user = %user, "Failed to send like result");
            }
        });
    }
}

/// Handle the cookie modal submission. Spawns the store flow so the
/// envelope is acked (closing the modal) before the confirmation DM.
fn handle_view_submission(state: &SocketModeState, event: SlackInteractionViewSubmissionEvent) {
    let SlackView::Modal(modal) = &event.view.view else {
        return;
    };
    let callback_id = modal.callback_id.as_ref().map(|id| id.to_string());
    if callback_id.as_deref() != Some(formatting::VIEW_COOKIE_MODAL) {
        debug!("View submission with unknown callback id, ignoring");
        return;
    }

    let user_id = event.user.id.to_string();

    let value = event
        .view
        .state_params
        .state
        .as_ref()
        .and_then(|view_state| {
            view_state
                .values
                .get(&SlackBlockId::new(formatting::BLOCK_COOKIE_INPUT.to_string()))
        })
        .and_then(|block| block.get(&SlackActionId::new(formatting::INPUT_COOKIE_VALUE.to_string())))
        .and_then(|input| input.value.clone())
        .unwrap_or_default();

    let adapter = state.adapter.clone();
    let orchestrator = state.orchestrator.clone();
    tokio::spawn(async move {
        // Empty submissions come back as None and are dropped silently.
        if let Some(outcome) = orchestrator.handle_cookie_submission(&value, &user_id).await {
            if let Err(e) = adapter.post_dm(&user_id, outcome.message()).await {
                error!(error = %e, user = %user_id, "Failed to send cookie confirmation");
            }
        }
    });
}
