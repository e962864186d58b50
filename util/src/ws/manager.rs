//! Room-based broadcast fabric for notification sockets.
//!
//! Uses one Tokio broadcast channel per room. A session "joins" a room by
//! subscribing to its channel; the gateway fans out by sending on the channels.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Type alias for a room path such as `user:12`.
type RoomPath = String;

/// Sender for a room's broadcast channel.
type Sender = broadcast::Sender<String>;

/// Receiver for a room's broadcast channel.
type Receiver = broadcast::Receiver<String>;

const ROOM_CAPACITY: usize = 100;

/// Manages broadcast channels per room.
///
/// - Lazily creates a channel the first time someone joins a room
/// - Removes rooms when their subscriber count drops to zero after sending, or when
///   a leaving session prunes them
/// - Sending to a room nobody joined is a silent no-op
#[derive(Clone, Default)]
pub struct WebSocketManager {
    inner: Arc<RwLock<HashMap<RoomPath, Sender>>>,
}

impl WebSocketManager {
    /// Creates a new, empty `WebSocketManager`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the given room, creating it if necessary.
    pub async fn subscribe(&self, room: &str) -> Receiver {
        let mut map = self.inner.write().await;
        map.entry(room.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Broadcasts a message to all members of `room`.
    ///
    /// Returns the number of receivers the message was handed to.
    pub async fn broadcast<T: Into<String>>(&self, room: &str, msg: T) -> usize {
        let mut map = self.inner.write().await;
        let Some(sender) = map.get(room) else {
            tracing::debug!(room, "No members in room; dropping message");
            return 0;
        };

        let delivered = sender.send(msg.into()).unwrap_or(0);
        if sender.receiver_count() == 0 {
            tracing::debug!("Removing room '{room}' due to no subscribers.");
            map.remove(room);
        }
        delivered
    }

    /// Removes `room` if it has no subscribers left. Returns whether it was removed.
    pub async fn prune(&self, room: &str) -> bool {
        let mut map = self.inner.write().await;
        match map.get(room) {
            Some(sender) if sender.receiver_count() == 0 => {
                map.remove(room);
                tracing::debug!(room, "Removed empty room");
                true
            }
            _ => false,
        }
    }

    /// Number of live subscriptions on `room`.
    #[cfg(test)]
    pub(crate) async fn member_count(&self, room: &str) -> usize {
        self.inner
            .read()
            .await
            .get(room)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) async fn has_room(&self, room: &str) -> bool {
        self.inner.read().await.contains_key(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, timeout};

    #[tokio::test]
    async fn it_broadcasts_to_all_members() {
        let manager = WebSocketManager::new();
        let room = "role:lecturer";

        let mut r1 = manager.subscribe(room).await;
        let mut r2 = manager.subscribe(room).await;

        assert_eq!(manager.broadcast(room, "hello world").await, 2);

        let msg1 = timeout(Duration::from_millis(50), r1.recv())
            .await
            .unwrap()
            .unwrap();
        let msg2 = timeout(Duration::from_millis(50), r2.recv())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(msg1, "hello world");
        assert_eq!(msg2, "hello world");
    }

    #[tokio::test]
    async fn it_creates_room_lazily() {
        let manager = WebSocketManager::new();
        let room = "user:1";
        assert!(!manager.has_room(room).await);
        let _rx = manager.subscribe(room).await;
        assert!(manager.has_room(room).await);
        assert_eq!(manager.member_count(room).await, 1);
    }

    #[tokio::test]
    async fn broadcast_to_unknown_room_is_a_no_op() {
        let manager = WebSocketManager::new();
        assert_eq!(manager.broadcast("user:404", "silent").await, 0);
    }

    #[tokio::test]
    async fn room_is_removed_after_broadcast_if_no_members() {
        let manager = WebSocketManager::new();
        let room = "user:2";
        {
            let _ = manager.subscribe(room).await;
        } // drop receiver
        manager.broadcast(room, "cleanup").await;
        assert!(!manager.has_room(room).await);
    }

    #[tokio::test]
    async fn prune_only_removes_rooms_without_members() {
        let manager = WebSocketManager::new();
        let kept = manager.subscribe("role:admin").await;
        drop(manager.subscribe("user:9").await);

        assert!(manager.prune("user:9").await);
        assert!(!manager.has_room("user:9").await);
        assert!(!manager.prune("role:admin").await);
        assert!(!manager.prune("user:unknown").await);
        drop(kept);
    }
}
