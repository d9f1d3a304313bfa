//! Per-recipient rendering contract.

use crate::domain::entities::ChatMessage;
use crate::shared::error::RelayError;

/// Turns a message into the bytes one recipient sees.
///
/// `is_self` is true when the recipient is the connection that sent the
/// message. It may only change a style marker, never the content.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    fn render(&self, message: &ChatMessage, is_self: bool) -> Result<String, RelayError>;
}
