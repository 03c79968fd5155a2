//! LinkedIn post URL validation.

use regex::Regex;
use std::sync::OnceLock;

static POST_URL_RE: OnceLock<Regex> = OnceLock::new();

fn post_url_re() -> &'static Regex {
    POST_URL_RE.get_or_init(|| {
        // The two shapes a likeable post URL takes:
        //   https://www.linkedin.com/posts/<author-slug>/<rest>
        //   https://www.linkedin.com/feed/update/urn:li:activity:<id>
        Regex::new(
            r"(?i)^https?://(?:www\.)?linkedin\.com/(?:posts/[^/\s]+/|feed/update/urn:li:activity:)\S+$",
        )
        .expect("post URL regex is valid")
    })
}

/// Whether `text` is a recognized LinkedIn post URL.
#[must_use]
pub fn is_post_url(text: &str) -> bool {
    post_url_re().is_match(text)
}
