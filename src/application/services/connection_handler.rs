//! Connection Handler
//!
//! One control loop per connection: register, read frames, normalize, enqueue,
//! and deregister once the read side breaks.
//!
//! ```text
//! Active --read failure--> Closing --leave + close--> Closed
//!   ^  |
//!   +--+ payload handled (message, discard or malformed)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use super::dispatcher::BroadcastSender;
use super::normalizer::{Normalized, Normalizer};
use crate::domain::{BroadcastEvent, ConnectionId, ConnectionState, FrameSink, FrameSource};
use crate::infrastructure::metrics;
use crate::infrastructure::registry::ConnectionRegistry;
use crate::shared::error::RelayError;

/// Drives connections from accept to close.
#[derive(Clone)]
pub struct ConnectionHandler {
    registry: Arc<ConnectionRegistry>,
    normalizer: Normalizer,
    queue: BroadcastSender,
    idle_timeout: Option<Duration>,
}

impl ConnectionHandler {
    pub fn new(registry: Arc<ConnectionRegistry>, queue: BroadcastSender) -> Self {
        Self {
            registry,
            normalizer: Normalizer::new(),
            queue,
            idle_timeout: None,
        }
    }

    /// Treat a connection that sends nothing for `idle_timeout` as broken.
    /// A zero duration disables the limit.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = (!idle_timeout.is_zero()).then_some(idle_timeout);
        self
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Run the connection to completion. Always ends in [`ConnectionState::Closed`].
    pub async fn run<S>(
        &self,
        id: ConnectionId,
        mut source: S,
        sink: Arc<dyn FrameSink>,
    ) -> ConnectionState
    where
        S: FrameSource,
    {
        self.registry.join(id, Arc::clone(&sink));

        let mut state = ConnectionState::Active;
        loop {
            state = match state {
                ConnectionState::Active => match self.read(&mut source).await {
                    Ok(raw) => self.handle_payload(id, &raw).await,
                    Err(e) => {
                        tracing::debug!(
                            connection_id = %id,
                            error = %e,
                            "Read failed, closing connection"
                        );
                        ConnectionState::Closing
                    }
                },
                ConnectionState::Closing => {
                    self.registry.leave(id);
                    sink.close().await;
                    ConnectionState::Closed
                }
                ConnectionState::Closed => break,
            };
        }

        state
    }

    async fn read<S: FrameSource>(&self, source: &mut S) -> Result<Vec<u8>, RelayError> {
        match self.idle_timeout {
            Some(limit) => timeout(limit, source.read_frame())
                .await
                .map_err(|_| RelayError::ReadFailure(format!("idle for {}s", limit.as_secs())))?,
            None => source.read_frame().await,
        }
    }

    /// Handle one inbound payload and return the next state.
    async fn handle_payload(&self, id: ConnectionId, raw: &[u8]) -> ConnectionState {
        let current_room = self.registry.room_of(id);

        let (message, connection_room) = match self.normalizer.normalize(raw, &current_room) {
            Ok(Normalized::Deliver {
                message,
                connection_room,
            }) => (message, connection_room),
            Ok(Normalized::Discard) => {
                metrics::record_discarded("empty");
                return ConnectionState::Active;
            }
            Err(e) => {
                tracing::debug!(connection_id = %id, error = %e, "Ignoring malformed payload");
                metrics::record_discarded("malformed");
                return ConnectionState::Active;
            }
        };

        // The dispatcher drops recipients whose writes fail; such a connection
        // is no longer live and stops here.
        if !self.registry.set_room(id, &connection_room) {
            tracing::debug!(connection_id = %id, "Connection no longer registered");
            return ConnectionState::Closing;
        }

        if self.queue.send(BroadcastEvent::new(message, id)).await.is_err() {
            tracing::error!(connection_id = %id, "Broadcast queue closed");
            return ConnectionState::Closing;
        }
        metrics::record_enqueued();

        ConnectionState::Active
    }
}
