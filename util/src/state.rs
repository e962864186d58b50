//! Application state container shared across Axum route handlers.
//!
//! Holds the database connection and the notification gateway. Both are cheap to
//! clone, so the state is passed by value into handlers via Axum's `State<T>`.

use crate::ws::NotificationGateway;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    gateway: NotificationGateway,
}

impl AppState {
    pub fn new(db: DatabaseConnection, gateway: NotificationGateway) -> Self {
        Self { db, gateway }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn gateway(&self) -> &NotificationGateway {
        &self.gateway
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for services that take ownership of their connection.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub fn gateway_clone(&self) -> NotificationGateway {
        self.gateway.clone()
    }
}
