//! Dispatcher
//!
//! The single consumer of the broadcast queue. Each event is fanned out to the
//! live connections in the message's room, rendered per recipient.
//!
//! A recipient whose write fails is closed and removed from the registry; a
//! recipient that fails to render is skipped. Neither stops delivery to the
//! rest of the room.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::{BroadcastEvent, Renderer};
use crate::infrastructure::metrics;
use crate::infrastructure::registry::{ConnectionRegistry, RoomMember};

/// Capacity of the broadcast queue unless configured otherwise.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Producer side of the broadcast queue. `send` waits while the queue is full.
pub type BroadcastSender = mpsc::Sender<BroadcastEvent>;

/// Consumer side of the broadcast queue.
pub type BroadcastReceiver = mpsc::Receiver<BroadcastEvent>;

/// Create the bounded broadcast queue. Capacity is at least one.
pub fn broadcast_queue(capacity: usize) -> (BroadcastSender, BroadcastReceiver) {
    mpsc::channel(capacity.max(1))
}

/// Per-event delivery tally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub write_failed: usize,
    pub render_failed: usize,
}

enum Delivery {
    Delivered,
    WriteFailed,
    RenderFailed,
}

/// Fans broadcast events out to room members.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ConnectionRegistry>,
    renderer: Arc<dyn Renderer>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ConnectionRegistry>, renderer: Arc<dyn Renderer>) -> Self {
        Self { registry, renderer }
    }

    /// Run the dispatch loop on its own task.
    pub fn spawn(self, events: BroadcastReceiver) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    /// Drain the queue until every sender is dropped.
    pub async fn run(self, mut events: BroadcastReceiver) {
        tracing::info!("Dispatcher started");

        while let Some(event) = events.recv().await {
            self.deliver(&event).await;
        }

        tracing::info!("Dispatcher stopped: broadcast queue closed");
    }

    /// Deliver one event to every live member of its room, sender included.
    pub async fn deliver(&self, event: &BroadcastEvent) -> DeliveryReport {
        let room = event.message.room();
        let members = self.registry.members_of_room(room);
        let mut report = DeliveryReport::default();

        for member in members {
            match self.deliver_to(event, &member).await {
                Delivery::Delivered => report.delivered += 1,
                Delivery::WriteFailed => report.write_failed += 1,
                Delivery::RenderFailed => report.render_failed += 1,
            }
        }

        tracing::debug!(
            room = %room,
            sender = %event.sender,
            delivered = report.delivered,
            write_failed = report.write_failed,
            render_failed = report.render_failed,
            "Message dispatched"
        );
        report
    }

    async fn deliver_to(&self, event: &BroadcastEvent, member: &RoomMember) -> Delivery {
        let is_self = member.id == event.sender;

        let frame = match self.renderer.render(&event.message, is_self) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(connection_id = %member.id, error = %e, "Failed to render message");
                metrics::record_delivery("render_failed");
                return Delivery::RenderFailed;
            }
        };

        match member.sink.write_frame(&frame).await {
            Ok(()) => {
                metrics::record_delivery("delivered");
                Delivery::Delivered
            }
            Err(e) => {
                tracing::warn!(
                    connection_id = %member.id,
                    error = %e,
                    "Write failed, dropping connection"
                );
                member.sink.close().await;
                self.registry.leave(member.id);
                metrics::record_delivery("write_failed");
                Delivery::WriteFailed
            }
        }
    }
}
