//! Chat message entity.
//!
//! A [`ChatMessage`] only exists once the normalizer has accepted an inbound
//! frame, so every field is populated and non-empty.

use serde::Serialize;

use crate::domain::value_objects::ConnectionId;

/// Room a connection belongs to until it names another one.
pub const DEFAULT_ROOM: &str = "chatroom";

/// Display name used when the client supplies none.
pub const DEFAULT_DISPLAY_NAME: &str = "Anon";

/// One normalized chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    sender_display_name: String,
    text: String,
    room: String,
    timestamp: String,
}

impl ChatMessage {
    /// Build a message, refusing any empty field.
    pub fn new(
        sender_display_name: impl Into<String>,
        text: impl Into<String>,
        room: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Option<Self> {
        let message = Self {
            sender_display_name: sender_display_name.into(),
            text: text.into(),
            room: room.into(),
            timestamp: timestamp.into(),
        };

        let complete = !message.sender_display_name.is_empty()
            && !message.text.is_empty()
            && !message.room.is_empty()
            && !message.timestamp.is_empty();

        complete.then_some(message)
    }

    pub fn sender_display_name(&self) -> &str {
        &self.sender_display_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// A normalized message paired with the connection that sent it.
///
/// Queued once, consumed once by the dispatcher.
#[derive(Debug, Clone)]
pub struct BroadcastEvent {
    pub message: ChatMessage,
    pub sender: ConnectionId,
}

impl BroadcastEvent {
    pub fn new(message: ChatMessage, sender: ConnectionId) -> Self {
        Self { message, sender }
    }
}
