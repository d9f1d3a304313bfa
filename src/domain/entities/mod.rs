//! # Domain Entities
//!
//! Core domain objects of the relay.
//!
//! - **ChatMessage**: A normalized message with its room and display metadata
//! - **BroadcastEvent**: A queued (message, sender) pair awaiting fan-out
//! - **Connection**: Lifecycle states plus the read/write transport contracts
//!
//! The transport traits are implemented in the presentation layer, following
//! the dependency inversion principle.

mod chat_message;
mod connection;

pub use chat_message::{BroadcastEvent, ChatMessage, DEFAULT_DISPLAY_NAME, DEFAULT_ROOM};
pub use connection::{ConnectionState, FrameSink, FrameSource};
