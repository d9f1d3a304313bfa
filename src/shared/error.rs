//! Relay Error Types
//!
//! Error taxonomy for the connection pipeline plus startup failures.
//! None of the relay errors are process-fatal.

/// Errors raised while moving a message from one connection to its room.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Inbound bytes did not decode into a frame. The connection stays open.
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Reading from a connection failed. Terminal for that connection.
    #[error("Read failure: {0}")]
    ReadFailure(String),

    /// Writing to a recipient failed. Terminal for that recipient.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// The renderer could not format a message for one recipient.
    #[error("Render failure: {0}")]
    RenderFailure(String),
}

/// Errors raised while building or running the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid server address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
