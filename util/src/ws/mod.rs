// util/src/ws/mod.rs
pub mod error;
pub mod events;
pub mod gateway;
pub mod manager;
pub mod registry;
pub mod rooms;
pub mod serve;
pub mod session;
pub mod types;

pub use error::GatewayError;
pub use events::{EnrollmentAction, EnrollmentUpdate, GradeUpdate, NotificationEvent};
pub use gateway::NotificationGateway;
pub use manager::WebSocketManager;
pub use registry::ConnectionRegistry;
pub use rooms::{NotificationKind, Room};
pub use session::{ConnectionState, Session, SessionHandle};

use chrono::Utc;
use serde::Serialize;

/// Standard event envelope sent over notification sockets.
#[derive(Serialize)]
pub struct EventEnvelope<'a, T> {
    #[serde(rename = "type")]
    pub r#type: &'static str,
    pub event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<&'a str>,
    pub payload: T,
    pub ts: String,
}

/// Serializes `payload` into an `EventEnvelope` frame.
pub fn envelope<T: Serialize>(
    event: &str,
    room: Option<&str>,
    payload: &T,
) -> Result<String, GatewayError> {
    let env = EventEnvelope {
        r#type: "event",
        event,
        room,
        payload,
        ts: Utc::now().to_rfc3339(),
    };
    Ok(serde_json::to_string(&env)?)
}

/// Broadcast a JSON-serialized `EventEnvelope` on `room`.
pub async fn emit<T: Serialize>(
    ws: &WebSocketManager,
    room: &Room,
    event: &str,
    payload: &T,
) -> Result<(), GatewayError> {
    let path = room.path();
    let frame = envelope(event, Some(&path), payload)?;
    ws.broadcast(&path, frame).await;
    Ok(())
}
