//! Application Services
//!
//! The relay pipeline: connections are normalized and enqueued by their
//! handlers, then fanned out by a single dispatcher.
//!
//! ## Available Services
//!
//! - **Normalizer**: Raw payload to ChatMessage, with fallback and default rules
//! - **Dispatcher**: Sequential consumer of the broadcast queue
//! - **ConnectionHandler**: Per-connection read loop and lifecycle

pub mod connection_handler;
pub mod dispatcher;
pub mod normalizer;

pub use connection_handler::ConnectionHandler;
pub use dispatcher::{
    broadcast_queue, BroadcastReceiver, BroadcastSender, DeliveryReport, Dispatcher,
    DEFAULT_QUEUE_CAPACITY,
};
pub use normalizer::{Normalized, Normalizer, DISPLAY_NAME_PRECEDENCE, TIMESTAMP_FORMAT};
