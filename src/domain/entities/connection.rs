//! Connection lifecycle and transport contracts.
//!
//! The transport itself lives outside the domain. A connection is split into a
//! [`FrameSource`] owned by its handler loop and a [`FrameSink`] shared with the
//! dispatcher through the registry.

use async_trait::async_trait;

use crate::shared::error::RelayError;

/// Lifecycle of a connection handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Reading frames.
    Active,
    /// Read failed; deregistering and releasing the transport.
    Closing,
    /// Terminal.
    Closed,
}

/// Read half of a connection.
#[async_trait]
pub trait FrameSource: Send {
    /// Wait for the next inbound payload.
    ///
    /// Any error is terminal for the connection.
    async fn read_frame(&mut self) -> Result<Vec<u8>, RelayError>;
}

/// Write half of a connection.
#[async_trait]
pub trait FrameSink: Send + Sync {
    /// Write one rendered frame.
    async fn write_frame(&self, frame: &str) -> Result<(), RelayError>;

    /// Release the underlying transport. Safe to call more than once.
    async fn close(&self);
}
