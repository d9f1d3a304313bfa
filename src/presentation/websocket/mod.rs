//! WebSocket Gateway
//!
//! Real-time chat connections via WebSocket.

pub mod handler;
pub mod transport;

pub use handler::ws_handler;
pub use transport::{WsSink, WsSource};
