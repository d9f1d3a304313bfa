//! Data Transfer Objects
//!
//! Wire records decoded from client frames.

pub mod inbound;

pub use inbound::InboundFrame;
