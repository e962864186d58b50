//! One live notification connection.
//!
//! A `Session` is transport-agnostic: it only owns the outbound frame queue that the
//! socket writer drains, plus one pump task per joined room that forwards room
//! broadcasts into that queue.

use std::collections::HashMap;

use axum::extract::ws::Message;
use serde::Serialize;
use tokio::{sync::mpsc, task::JoinHandle};
use uuid::Uuid;

use super::{GatewayError, WebSocketManager, envelope, rooms::Room};
use crate::auth::Identity;

/// Lifecycle of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Authenticating,
    Authenticated,
    Disconnected,
}

/// Cheap clonable handle used to push frames to a session from outside its task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: Uuid,
    out_tx: mpsc::Sender<Message>,
}

impl SessionHandle {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Queue a single text frame for this client.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), GatewayError> {
        self.out_tx
            .send(Message::Text(text.into().into()))
            .await
            .map_err(|_| GatewayError::SessionClosed(self.session_id))
    }

    /// Queue an enveloped event for this client.
    pub async fn emit<T: Serialize>(&self, event: &str, payload: &T) -> Result<(), GatewayError> {
        let frame = envelope(event, None, payload)?;
        self.send_text(frame).await
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.session_id == other.session_id
    }
}

pub struct Session {
    id: Uuid,
    state: ConnectionState,
    identity: Option<Identity>,
    rooms: HashMap<String, JoinHandle<()>>,
    /// Set on the first join; used to drop rooms this session leaves empty.
    ws: Option<WebSocketManager>,
    out_tx: mpsc::Sender<Message>,
}

impl Session {
    pub fn new(out_tx: mpsc::Sender<Message>) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: ConnectionState::Connecting,
            identity: None,
            rooms: HashMap::new(),
            ws: None,
            out_tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == ConnectionState::Authenticated
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            session_id: self.id,
            out_tx: self.out_tx.clone(),
        }
    }

    pub(crate) fn begin_authentication(&mut self) {
        self.state = ConnectionState::Authenticating;
    }

    pub(crate) fn authenticated(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.state = ConnectionState::Authenticated;
    }

    /// Joins `room`. The subscription is in place before this returns, so anything
    /// broadcast afterwards reaches this session. Joining twice is a no-op.
    pub async fn join(&mut self, ws: &WebSocketManager, room: &Room) {
        let path = room.path();
        if self.rooms.contains_key(&path) {
            return;
        }

        self.ws.get_or_insert_with(|| ws.clone());
        let mut rx = ws.subscribe(&path).await;
        let out_tx = self.out_tx.clone();
        let pump_room = path.clone();
        let pump = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(text) => {
                        if out_tx.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(room = %pump_room, skipped, "Session lagged; frames dropped");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        self.rooms.insert(path, pump);
    }

    #[cfg(test)]
    pub(crate) fn is_in_room(&self, room: &Room) -> bool {
        self.rooms.contains_key(&room.path())
    }

    #[cfg(test)]
    pub(crate) fn rooms(&self) -> Vec<String> {
        let mut rooms: Vec<String> = self.rooms.keys().cloned().collect();
        rooms.sort();
        rooms
    }

    /// Send an event to this client only.
    pub async fn emit<T: Serialize>(&self, event: &str, payload: &T) -> Result<(), GatewayError> {
        self.handle().emit(event, payload).await
    }

    /// Leaves every room and asks the transport to close. Idempotent.
    pub async fn disconnect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        self.leave_rooms().await;
        let _ = self.out_tx.send(Message::Close(None)).await;
        self.state = ConnectionState::Disconnected;
    }

    /// Stops every pump, then removes the rooms nobody else is subscribed to.
    async fn leave_rooms(&mut self) {
        let rooms: Vec<(String, JoinHandle<()>)> = self.rooms.drain().collect();
        for (path, pump) in rooms {
            pump.abort();
            // The pump owns the room receiver; wait until it is dropped.
            let _ = pump.await;
            if let Some(ws) = &self.ws {
                ws.prune(&path).await;
            }
        }
    }

    fn leave_all(&mut self) {
        for (_, pump) in self.rooms.drain() {
            pump.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.leave_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use tokio::time::{Duration, timeout};

    async fn next_text(rx: &mut mpsc::Receiver<Message>) -> String {
        match timeout(Duration::from_millis(100), rx.recv()).await {
            Ok(Some(Message::Text(t))) => t.to_string(),
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn joined_rooms_are_forwarded_to_the_outbound_queue() {
        let ws = WebSocketManager::new();
        let (tx, mut rx) = mpsc::channel(8);
        let mut session = Session::new(tx);

        session.join(&ws, &Room::Role(Role::Admin)).await;
        session.join(&ws, &Room::Role(Role::Admin)).await;
        assert_eq!(ws.member_count("role:admin").await, 1);

        ws.broadcast("role:admin", "hi").await;
        assert_eq!(next_text(&mut rx).await, "hi");
    }

    #[tokio::test]
    async fn disconnect_leaves_rooms_and_queues_close() {
        let ws = WebSocketManager::new();
        let (tx, mut rx) = mpsc::channel(8);
        let mut session = Session::new(tx);
        session.join(&ws, &Room::User(3)).await;

        session.disconnect().await;
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(session.rooms().is_empty());
        assert!(matches!(rx.recv().await, Some(Message::Close(None))));

        session.disconnect().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn disconnect_drops_rooms_left_empty() {
        let ws = WebSocketManager::new();
        let (tx, _rx) = mpsc::channel(8);
        let mut leaving = Session::new(tx);
        let (tx2, _rx2) = mpsc::channel(8);
        let mut staying = Session::new(tx2);

        leaving.join(&ws, &Room::User(11)).await;
        leaving.join(&ws, &Room::Role(Role::Lecturer)).await;
        staying.join(&ws, &Room::Role(Role::Lecturer)).await;

        leaving.disconnect().await;

        assert!(!ws.has_room("user:11").await);
        assert!(ws.has_room("role:lecturer").await);
        assert_eq!(ws.member_count("role:lecturer").await, 1);
    }

    #[tokio::test]
    async fn direct_emit_wraps_payload_in_envelope() {
        let (tx, mut rx) = mpsc::channel(8);
        let session = Session::new(tx);
        session
            .emit("pong", &serde_json::json!({ "timestamp": "t" }))
            .await
            .unwrap();

        let v: serde_json::Value = serde_json::from_str(&next_text(&mut rx).await).unwrap();
        assert_eq!(v["type"], "event");
        assert_eq!(v["event"], "pong");
        assert_eq!(v["payload"]["timestamp"], "t");
        assert!(v.get("room").is_none());
    }
}
