//! Connection Registry
//!
//! Tracks which connections are live and which room each one is in.
//!
//! Liveness and room are kept in a single entry per connection behind one
//! lock, so a connection can never be seen as live without a room or the other
//! way round. Handlers join, leave and change rooms; the dispatcher reads room
//! membership and removes recipients whose writes fail.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{ConnectionId, FrameSink, DEFAULT_ROOM};
use crate::infrastructure::metrics;

/// A live connection returned by a membership query.
#[derive(Clone)]
pub struct RoomMember {
    pub id: ConnectionId,
    pub sink: Arc<dyn FrameSink>,
}

impl fmt::Debug for RoomMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomMember").field("id", &self.id).finish()
    }
}

struct Entry {
    room: String,
    sink: Arc<dyn FrameSink>,
}

impl Entry {
    fn room(&self) -> &str {
        resolve_room(&self.room)
    }
}

fn resolve_room(room: &str) -> &str {
    if room.is_empty() {
        DEFAULT_ROOM
    } else {
        room
    }
}

/// Registry of live connections keyed by [`ConnectionId`].
#[derive(Default)]
pub struct ConnectionRegistry {
    entries: RwLock<HashMap<ConnectionId, Entry>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a connection live in the default room.
    ///
    /// Joining again with the same id replaces the sink and resets the room.
    pub fn join(&self, id: ConnectionId, sink: Arc<dyn FrameSink>) {
        let live = {
            let mut entries = self.entries.write();
            entries.insert(
                id,
                Entry {
                    room: DEFAULT_ROOM.to_string(),
                    sink,
                },
            );
            entries.len()
        };
        metrics::set_connections_active(live);

        tracing::info!(connection_id = %id, room = DEFAULT_ROOM, "Connection registered");
    }

    /// Remove a connection. Returns false if it was not a member.
    pub fn leave(&self, id: ConnectionId) -> bool {
        let (removed, live) = {
            let mut entries = self.entries.write();
            let removed = entries.remove(&id).is_some();
            (removed, entries.len())
        };

        if removed {
            metrics::set_connections_active(live);
            tracing::info!(connection_id = %id, "Connection unregistered");
        }
        removed
    }

    /// Move a live connection to another room. Returns false if it is not live.
    pub fn set_room(&self, id: ConnectionId, room: &str) -> bool {
        match self.entries.write().get_mut(&id) {
            Some(entry) => {
                if entry.room != room {
                    tracing::debug!(
                        connection_id = %id,
                        from = %entry.room,
                        to = %room,
                        "Room changed"
                    );
                    entry.room = room.to_string();
                }
                true
            }
            None => false,
        }
    }

    /// Current room of a connection, or the default room if unknown.
    pub fn room_of(&self, id: ConnectionId) -> String {
        self.entries
            .read()
            .get(&id)
            .map(|entry| entry.room().to_string())
            .unwrap_or_else(|| DEFAULT_ROOM.to_string())
    }

    /// Snapshot of the live connections in `room`.
    ///
    /// An empty `room` means the default room.
    pub fn members_of_room(&self, room: &str) -> Vec<RoomMember> {
        let room = resolve_room(room);
        self.entries
            .read()
            .iter()
            .filter(|(_, entry)| entry.room() == room)
            .map(|(id, entry)| RoomMember {
                id: *id,
                sink: Arc::clone(&entry.sink),
            })
            .collect()
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.entries.read().contains_key(&id)
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Number of distinct rooms with at least one live connection.
    pub fn room_count(&self) -> usize {
        self.entries
            .read()
            .values()
            .map(Entry::room)
            .collect::<HashSet<_>>()
            .len()
    }
}
