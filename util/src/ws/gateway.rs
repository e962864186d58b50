//! Notification gateway: authenticates sockets, manages room membership and fans
//! notification events out to the right rooms.
//!
//! Delivery is at-most-once and best-effort. Nothing is queued for users who are
//! offline and nothing is acknowledged.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::{
    GatewayError, WebSocketManager, emit,
    events::{EnrollmentUpdate, GradeUpdate, NotificationEvent, iso_timestamp},
    registry::ConnectionRegistry,
    rooms::{NotificationKind, Room},
    session::Session,
    types::{ConnectionStats, Connected, ErrorPayload, Pong, Subscribed, WsIn},
};
use crate::auth::{AuthError, CredentialVerifier, Identity};

#[derive(Clone)]
pub struct NotificationGateway {
    ws: WebSocketManager,
    registry: ConnectionRegistry,
    verifier: Arc<dyn CredentialVerifier>,
}

impl NotificationGateway {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            ws: WebSocketManager::new(),
            registry: ConnectionRegistry::new(),
            verifier,
        }
    }

    /// Read access to the live-session registry.
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn rooms(&self) -> &WebSocketManager {
        &self.ws
    }

    // -------------------- Connection lifecycle --------------------

    /// Handshake hook. On failure the client gets an `error` frame and the session is
    /// disconnected without ever becoming authenticated.
    pub async fn on_connect(
        &self,
        session: &mut Session,
        token: Option<&str>,
    ) -> Result<Identity, AuthError> {
        session.begin_authentication();

        let verified = match token {
            Some(token) => self.verifier.verify(token),
            None => Err(AuthError::MissingToken),
        };

        let identity = match verified {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(session = %session.id(), error = %e, "Notification socket authentication failed");
                let _ = session
                    .emit(
                        "error",
                        &ErrorPayload {
                            message: "Authentication failed".into(),
                        },
                    )
                    .await;
                session.disconnect().await;
                return Err(e);
            }
        };

        session.authenticated(identity);
        if let Some(evicted) = self
            .registry
            .register(identity.user_id, identity.role, session.handle())
            .await
        {
            tracing::debug!(
                user_id = identity.user_id,
                evicted = %evicted.session_id(),
                "Replaced previous session"
            );
        }

        session.join(&self.ws, &Room::User(identity.user_id)).await;
        session.join(&self.ws, &Room::Role(identity.role)).await;

        tracing::info!(
            session = %session.id(),
            user_id = identity.user_id,
            role = %identity.role,
            "Client connected"
        );

        let _ = session
            .emit(
                "connected",
                &Connected {
                    message: "Successfully connected to notifications",
                    user_id: identity.user_id,
                    timestamp: iso_timestamp(Utc::now()),
                },
            )
            .await;

        Ok(identity)
    }

    /// Disconnect hook. Room memberships go with the session's pumps.
    pub async fn on_disconnect(&self, session: &mut Session) {
        if let Some(identity) = session.identity() {
            self.registry
                .unregister_session(identity.user_id, session.id())
                .await;
            tracing::info!(session = %session.id(), user_id = identity.user_id, "Client disconnected");
        } else {
            tracing::info!(session = %session.id(), "Client disconnected");
        }
        session.disconnect().await;
    }

    /// Raw text frame from the client.
    pub async fn on_text(&self, session: &mut Session, raw: &str) {
        match serde_json::from_str::<WsIn>(raw) {
            Ok(msg) => self.on_message(session, msg).await,
            Err(e) => {
                tracing::warn!(session = %session.id(), "Invalid notification frame: {e}");
                let _ = session
                    .emit(
                        "error",
                        &ErrorPayload {
                            message: format!("invalid frame: {e}"),
                        },
                    )
                    .await;
            }
        }
    }

    pub async fn on_message(&self, session: &mut Session, msg: WsIn) {
        if !session.is_authenticated() {
            return;
        }

        match msg {
            WsIn::Subscribe { events } => {
                for name in &events {
                    if let Some(kind) = NotificationKind::from_name(name) {
                        session.join(&self.ws, &Room::Event(kind)).await;
                        tracing::debug!(session = %session.id(), event = kind.as_str(), "Subscribed");
                    }
                }
                let _ = session
                    .emit(
                        "subscribed",
                        &Subscribed {
                            events,
                            timestamp: iso_timestamp(Utc::now()),
                        },
                    )
                    .await;
            }
            WsIn::Ping => {
                let _ = session
                    .emit(
                        "pong",
                        &Pong {
                            timestamp: iso_timestamp(Utc::now()),
                        },
                    )
                    .await;
            }
        }
    }

    // -------------------- Fan-out --------------------

    pub async fn emit_grade_update(&self, update: GradeUpdate) -> Result<(), GatewayError> {
        let grade = update.grade;
        let title = update.assignment_title.clone();
        self.dispatch(&NotificationEvent::GradeUpdate(update)).await?;
        tracing::info!("Grade update notification sent: {title} - {grade}%");
        Ok(())
    }

    pub async fn emit_enrollment_update(
        &self,
        update: EnrollmentUpdate,
    ) -> Result<(), GatewayError> {
        let course = update.course_name.clone();
        let action = update.action;
        self.dispatch(&NotificationEvent::EnrollmentUpdate(update))
            .await?;
        tracing::info!("Enrollment update notification sent: {action:?} in {course}");
        Ok(())
    }

    /// Sends `event` to each of its target rooms.
    pub async fn dispatch(&self, event: &NotificationEvent) -> Result<(), GatewayError> {
        tracing::info!(
            student_id = event.student_id(),
            event = event.kind().as_str(),
            "Emitting notification"
        );
        for room in event.target_rooms() {
            emit(&self.ws, &room, event.kind().as_str(), event).await?;
        }
        Ok(())
    }

    /// Sends directly to one user's registered session. Returns `false` when the user
    /// is not connected.
    pub async fn send_to_user<T: Serialize>(
        &self,
        user_id: i64,
        event: &str,
        payload: &T,
    ) -> Result<bool, GatewayError> {
        match self.registry.lookup(user_id).await {
            Some(handle) => {
                handle.emit(event, payload).await?;
                tracing::info!(user_id, "Sent {event} to user");
                Ok(true)
            }
            None => {
                tracing::warn!(user_id, "User not connected, cannot send {event}");
                Ok(false)
            }
        }
    }

    /// Sends to every registered session. Returns how many sessions accepted the frame.
    pub async fn broadcast<T: Serialize>(
        &self,
        event: &str,
        payload: &T,
    ) -> Result<usize, GatewayError> {
        let frame = super::envelope(event, None, payload)?;
        let mut delivered = 0;
        for (user_id, handle) in self.registry.handles().await {
            match handle.send_text(frame.clone()).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::debug!(user_id, error = %e, "Skipping closed session"),
            }
        }
        tracing::info!("Broadcasted {event} to {delivered} connected users");
        Ok(delivered)
    }

    pub async fn connection_stats(&self) -> ConnectionStats {
        ConnectionStats {
            connected_users: self.registry.count().await,
            timestamp: iso_timestamp(Utc::now()),
        }
    }
}
