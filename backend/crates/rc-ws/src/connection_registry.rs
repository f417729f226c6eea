use crate::{ConnectionId, ConnectionLimits, Result as WsErrorResult, RoomMembership, WsError};

use rc_proto::{ServerEvent, UserRef};

use std::collections::{HashMap, HashSet};
use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::Message;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::sync::{RwLock, mpsc};

/// Registry for tracking active WebSocket connections and their rooms.
///
/// Each worker owns one registry shard; a connection lives on exactly one
/// shard for its whole lifetime, so room fan-out never crosses shards.
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
}

struct RegistryInner {
    /// All active connections by connection_id
    connections: HashMap<ConnectionId, ConnectionEntry>,
    /// Occupants of each project room
    rooms: HashMap<String, HashSet<ConnectionId>>,
}

struct ConnectionEntry {
    sender: mpsc::Sender<Message>,
    #[allow(dead_code)]
    connected_at: DateTime<Utc>,
    membership: RoomMembership,
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
                rooms: HashMap::new(),
            })),
            limits,
        }
    }

    /// Register a new connection, returns its ConnectionId if successful
    pub async fn register(&self, sender: mpsc::Sender<Message>) -> WsErrorResult<ConnectionId> {
        let mut inner = self.inner.write().await;

        if inner.connections.len() >= self.limits.max_total {
            warn!(
                "Connection limit reached: {}/{}",
                inner.connections.len(),
                self.limits.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                current: inner.connections.len(),
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let connection_id = ConnectionId::new();
        inner.connections.insert(
            connection_id,
            ConnectionEntry {
                sender,
                connected_at: Utc::now(),
                membership: RoomMembership::new(),
            },
        );
        info!(
            "Registered connection {connection_id} ({} total)",
            inner.connections.len()
        );

        Ok(connection_id)
    }

    /// Unregister a connection and evict it from every room it occupied
    pub async fn unregister(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;

        if let Some(entry) = inner.connections.remove(&connection_id) {
            for project in entry.membership.projects() {
                if let Some(occupants) = inner.rooms.get_mut(project) {
                    occupants.remove(&connection_id);
                    if occupants.is_empty() {
                        inner.rooms.remove(project);
                    }
                }
            }
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                inner.connections.len()
            );
        }
    }

    /// Add a connection to a project room.
    ///
    /// Returns true when the connection newly joined, false when it was
    /// already a member. The user identity sticks from the first join.
    pub async fn join_room(
        &self,
        connection_id: ConnectionId,
        project: &str,
        user: UserRef,
    ) -> WsErrorResult<bool> {
        let mut inner = self.inner.write().await;

        let entry = inner.connections.get_mut(&connection_id).ok_or_else(|| {
            WsError::UnknownConnection {
                connection_id,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let joined = entry.membership.join(project, user);
        if joined {
            inner
                .rooms
                .entry(project.to_string())
                .or_default()
                .insert(connection_id);
            info!("Connection {connection_id} entered room {project}");
        } else {
            debug!("Connection {connection_id} already in room {project}");
        }

        Ok(joined)
    }

    /// Remove a connection from every room it occupies, returning them
    pub async fn leave_rooms(&self, connection_id: ConnectionId) -> WsErrorResult<Vec<String>> {
        let mut inner = self.inner.write().await;

        let entry = inner.connections.get_mut(&connection_id).ok_or_else(|| {
            WsError::UnknownConnection {
                connection_id,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let left = entry.membership.leave_all();
        for project in &left {
            if let Some(occupants) = inner.rooms.get_mut(project) {
                occupants.remove(&connection_id);
                if occupants.is_empty() {
                    inner.rooms.remove(project);
                }
            }
            info!("Connection {connection_id} left room {project}");
        }

        Ok(left)
    }

    /// Whether a connection currently occupies a room
    pub async fn is_member(&self, connection_id: ConnectionId, project: &str) -> bool {
        let inner = self.inner.read().await;
        inner
            .connections
            .get(&connection_id)
            .is_some_and(|entry| entry.membership.is_member(project))
    }

    /// Occupant count for one room
    pub async fn room_size(&self, project: &str) -> usize {
        let inner = self.inner.read().await;
        inner.rooms.get(project).map_or(0, HashSet::len)
    }

    /// Send one event to a single connection.
    ///
    /// A full outgoing buffer drops the event rather than blocking the
    /// caller; the slow client catches up or gets disconnected by its
    /// own send task.
    pub async fn emit_to(
        &self,
        connection_id: ConnectionId,
        event: &ServerEvent,
    ) -> WsErrorResult<()> {
        let inner = self.inner.read().await;

        let entry = inner.connections.get(&connection_id).ok_or_else(|| {
            WsError::UnknownConnection {
                connection_id,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        entry
            .sender
            .try_send(Message::Text(event.to_json().into()))
            .map_err(|_| WsError::SendBufferFull {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Fan one event out to every occupant of a room.
    ///
    /// Returns the number of connections that accepted the event; slow
    /// clients are skipped with a log entry, never awaited.
    pub async fn emit_to_room(&self, project: &str, event: &ServerEvent) -> usize {
        let inner = self.inner.read().await;

        let Some(occupants) = inner.rooms.get(project) else {
            return 0;
        };

        let payload = event.to_json();
        let mut delivered = 0;
        for connection_id in occupants {
            let Some(entry) = inner.connections.get(connection_id) else {
                continue;
            };
            match entry.sender.try_send(Message::Text(payload.clone().into())) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    debug!("Dropped room event for slow connection {connection_id}");
                }
            }
        }

        delivered
    }

    /// Whether this shard can accept another connection
    pub async fn has_capacity(&self) -> bool {
        let inner = self.inner.read().await;
        inner.connections.len() < self.limits.max_total
    }

    /// Get total connection count
    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
        }
    }
}
