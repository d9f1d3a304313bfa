//! Normalizer
//!
//! Turns a raw inbound payload into a [`ChatMessage`], or decides that there is
//! nothing to deliver.
//!
//! Rules, in order:
//! 1. Decode the payload; failure is [`RelayError::MalformedPayload`].
//! 2. Trim `text`, both display names and `room`.
//! 3. Blank `text` is discarded without error.
//! 4. Display name follows [`DISPLAY_NAME_PRECEDENCE`], then `"Anon"`.
//! 5. A non-empty `room` moves the connection there; otherwise the
//!    connection's current room is used, defaulting to `"chatroom"`.
//! 6. A supplied timestamp is kept verbatim; otherwise the current local time
//!    is stamped as `HH:MM`.

use chrono::{Local, NaiveTime};

use crate::application::dto::InboundFrame;
use crate::domain::{ChatMessage, DEFAULT_DISPLAY_NAME, DEFAULT_ROOM};
use crate::shared::error::RelayError;

/// Display format for stamped times (24-hour, zero-padded).
pub const TIMESTAMP_FORMAT: &str = "%H:%M";

/// Fields that may carry the sender's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    ClientName,
    DisplayNameAlt,
}

/// First non-empty field wins.
pub const DISPLAY_NAME_PRECEDENCE: [NameField; 2] =
    [NameField::ClientName, NameField::DisplayNameAlt];

/// Result of normalizing one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Nothing to deliver. The connection's room is unchanged.
    Discard,
    /// A message to broadcast, plus the room the sending connection is in
    /// afterwards.
    Deliver {
        message: ChatMessage,
        connection_room: String,
    },
}

/// Trimmed view over a decoded frame.
struct Fields<'a> {
    client_name: &'a str,
    display_name_alt: &'a str,
    text: &'a str,
    room: &'a str,
    timestamp: &'a str,
}

impl<'a> Fields<'a> {
    fn trimmed(frame: &'a InboundFrame) -> Self {
        fn trim(value: &Option<String>) -> &str {
            value.as_deref().map(str::trim).unwrap_or_default()
        }

        Self {
            client_name: trim(&frame.client_name),
            display_name_alt: trim(&frame.display_name_alt),
            text: trim(&frame.text),
            room: trim(&frame.room),
            timestamp: frame.timestamp.as_deref().unwrap_or_default(),
        }
    }

    fn name(&self, field: NameField) -> &'a str {
        match field {
            NameField::ClientName => self.client_name,
            NameField::DisplayNameAlt => self.display_name_alt,
        }
    }

    fn display_name(&self) -> &'a str {
        DISPLAY_NAME_PRECEDENCE
            .iter()
            .map(|field| self.name(*field))
            .find(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

/// Stateless payload normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize `raw` for a connection currently in `current_room`, stamping
    /// the local wall-clock time when needed.
    pub fn normalize(&self, raw: &[u8], current_room: &str) -> Result<Normalized, RelayError> {
        self.normalize_at(raw, current_room, Local::now().time())
    }

    /// Normalize with an explicit clock reading.
    pub fn normalize_at(
        &self,
        raw: &[u8],
        current_room: &str,
        now: NaiveTime,
    ) -> Result<Normalized, RelayError> {
        let frame = InboundFrame::from_slice(raw)?;
        let fields = Fields::trimmed(&frame);

        if fields.text.is_empty() {
            return Ok(Normalized::Discard);
        }

        let room = [fields.room, current_room.trim()]
            .into_iter()
            .find(|room| !room.is_empty())
            .unwrap_or(DEFAULT_ROOM);

        let timestamp = if fields.timestamp.is_empty() {
            now.format(TIMESTAMP_FORMAT).to_string()
        } else {
            fields.timestamp.to_string()
        };

        let normalized = ChatMessage::new(fields.display_name(), fields.text, room, timestamp)
            .map_or(Normalized::Discard, |message| Normalized::Deliver {
                message,
                connection_room: room.to_string(),
            });

        Ok(normalized)
    }
}
