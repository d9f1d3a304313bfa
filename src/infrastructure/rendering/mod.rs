//! HTML Rendering
//!
//! Renders chat lines as out-of-band HTML fragments that the browser client
//! appends to its message list.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::{ChatMessage, Renderer};
use crate::shared::error::RelayError;

/// CSS class for the sender's own copy of a message.
pub const SELF_CLASS: &str = "me";

/// CSS class for everyone else's copy.
pub const OTHER_CLASS: &str = "them";

/// Default [`Renderer`] producing one HTML fragment per message.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, message: &ChatMessage, is_self: bool) -> Result<String, RelayError> {
        let class = if is_self { SELF_CLASS } else { OTHER_CLASS };

        Ok(format!(
            concat!(
                r#"<div id="messages" hx-swap-oob="beforeend">"#,
                r#"<div class="message {class}" data-room="{room}">"#,
                r#"<span class="sender">{sender}</span>"#,
                r#"<span class="timestamp">{timestamp}</span>"#,
                r#"<p class="text">{text}</p>"#,
                "</div></div>",
            ),
            class = class,
            room = encode_double_quoted_attribute(message.room()),
            sender = encode_text(message.sender_display_name()),
            timestamp = encode_text(message.timestamp()),
            text = encode_text(message.text()),
        ))
    }
}
