//! Slack-specific formatting: share message blocks and the cookie modal.

use slack_morphism::prelude::*;

/// Action id of the like button attached to a shared post.
pub const ACTION_LIKE_LINKEDIN: &str = "like_linkedin";
/// Callback id of the cookie-entry modal.
pub const VIEW_COOKIE_MODAL: &str = "cookie_modal";
/// Block id of the modal's input block.
pub const BLOCK_COOKIE_INPUT: &str = "cookie_input";
/// Action id of the modal's text input element.
pub const INPUT_COOKIE_VALUE: &str = "cookie_value";

/// Build the in-channel share message: a section naming the sharer and an
/// actions block whose button carries the post URL as its value.
pub fn share_blocks(url: &str, shared_by: &str) -> Vec<SlackBlock> {
    vec![
        SlackBlock::Section(
            SlackSectionBlock::new().with_text(SlackBlockText::MarkDown(
                SlackBlockMarkDownText::new(format!(
                    "LinkedIn link shared by <@{shared_by}>: <{url}|www.linkedin.com>"
                )),
            )),
        ),
        SlackBlock::Actions(SlackActionsBlock::new(vec![
            SlackActionBlockElement::Button(
                SlackBlockButtonElement::new(ACTION_LIKE_LINKEDIN.into(), pt!("Like Link"))
                    .with_value(url.to_string()),
            ),
        ])),
    ]
}

/// Fallback text for clients that do not render blocks.
pub fn share_fallback_text(url: &str, shared_by: &str) -> String {
    format!("LinkedIn link shared by <@{shared_by}>: {url}")
}

/// Build the single-field modal for entering the LinkedIn cookie.
pub fn cookie_modal() -> SlackView {
    SlackView::Modal(
        SlackModalView::new(
            pt!("Set Cookie"),
            vec![SlackBlock::Input(
                SlackInputBlock::new(
                    pt!("Enter cookie value"),
                    SlackInputBlockElement::PlainTextInput(SlackBlockPlainTextInputElement::new(
                        INPUT_COOKIE_VALUE.into(),
                    )),
                )
                .with_block_id(BLOCK_COOKIE_INPUT.into()),
            )],
        )
        .with_submit(pt!("Submit"))
        .with_callback_id(VIEW_COOKIE_MODAL.into()),
    )
}
