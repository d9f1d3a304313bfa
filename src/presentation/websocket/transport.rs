//! WebSocket Transport
//!
//! Adapts a split axum [`WebSocket`] to the relay's [`FrameSource`] and
//! [`FrameSink`] contracts.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::Mutex;

use crate::domain::{FrameSink, FrameSource};
use crate::shared::error::RelayError;

/// Split a socket into its relay read and write halves.
pub fn split(socket: WebSocket) -> (WsSource, WsSink) {
    let (sender, receiver) = socket.split();
    (
        WsSource { receiver },
        WsSink {
            sender: Mutex::new(sender),
        },
    )
}

/// Read half. Control frames are consumed here and never surface as payloads.
pub struct WsSource {
    receiver: SplitStream<WebSocket>,
}

#[async_trait]
impl FrameSource for WsSource {
    async fn read_frame(&mut self) -> Result<Vec<u8>, RelayError> {
        loop {
            match self.receiver.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text.as_str().as_bytes().to_vec()),
                Some(Ok(Message::Binary(data))) => return Ok(data.to_vec()),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                    // Pong is handled automatically by axum
                    continue;
                }
                Some(Ok(Message::Close(_))) | None => {
                    return Err(RelayError::ReadFailure("connection closed".into()))
                }
                Some(Err(e)) => return Err(RelayError::ReadFailure(e.to_string())),
            }
        }
    }
}

/// Write half, shared between the handler and the dispatcher.
pub struct WsSink {
    sender: Mutex<SplitSink<WebSocket, Message>>,
}

#[async_trait]
impl FrameSink for WsSink {
    async fn write_frame(&self, frame: &str) -> Result<(), RelayError> {
        self.sender
            .lock()
            .await
            .send(Message::Text(frame.to_owned().into()))
            .await
            .map_err(|e| RelayError::WriteFailure(e.to_string()))
    }

    async fn close(&self) {
        let mut sender = self.sender.lock().await;
        // Either call fails once the peer is gone; there is nothing left to release then.
        let _ = sender.send(Message::Close(None)).await;
        let _ = sender.close().await;
    }
}
