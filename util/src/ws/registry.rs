//! Tracks at most one live session per authenticated user.
//!
//! The registry is process-local. Writes are crate-private: only the gateway's
//! connect/disconnect hooks mutate it, everyone else reads.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::session::SessionHandle;
use crate::roles::Role;

#[derive(Debug, Clone)]
pub struct RegisteredSession {
    pub role: Role,
    pub handle: SessionHandle,
}

#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<RwLock<HashMap<i64, RegisteredSession>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `handle` as the live session of `user_id`, replacing any previous one.
    ///
    /// The evicted handle is returned; its transport is left open.
    pub(crate) async fn register(
        &self,
        user_id: i64,
        role: Role,
        handle: SessionHandle,
    ) -> Option<SessionHandle> {
        let entry = RegisteredSession { role, handle };
        self.inner
            .write()
            .await
            .insert(user_id, entry)
            .map(|old| old.handle)
    }

    /// Removes whatever session is tracked for `user_id`. No-op if absent.
    pub(crate) async fn unregister(&self, user_id: i64) -> Option<SessionHandle> {
        self.inner.write().await.remove(&user_id).map(|s| s.handle)
    }

    /// Removes the entry only if it still belongs to `session_id`.
    ///
    /// A connection that was replaced by a newer one must not unregister its successor.
    pub(crate) async fn unregister_session(&self, user_id: i64, session_id: Uuid) -> bool {
        let mut map = self.inner.write().await;
        match map.get(&user_id) {
            Some(entry) if entry.handle.session_id() == session_id => {
                map.remove(&user_id);
                true
            }
            _ => false,
        }
    }

    pub async fn is_connected(&self, user_id: i64) -> bool {
        self.inner.read().await.contains_key(&user_id)
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn lookup(&self, user_id: i64) -> Option<SessionHandle> {
        self.inner
            .read()
            .await
            .get(&user_id)
            .map(|s| s.handle.clone())
    }

    /// Snapshot of every tracked session handle.
    pub async fn handles(&self) -> Vec<(i64, SessionHandle)> {
        self.inner
            .read()
            .await
            .iter()
            .map(|(id, s)| (*id, s.handle.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ws::session::Session;
    use tokio::sync::mpsc;

    fn session() -> (Session, mpsc::Receiver<axum::extract::ws::Message>) {
        let (tx, rx) = mpsc::channel(4);
        (Session::new(tx), rx)
    }

    #[tokio::test]
    async fn register_and_lookup() {
        let registry = ConnectionRegistry::new();
        let (s, _rx) = session();

        assert!(!registry.is_connected(1).await);
        registry.register(1, Role::Student, s.handle()).await;

        assert!(registry.is_connected(1).await);
        assert_eq!(registry.count().await, 1);
        assert_eq!(registry.lookup(1).await, Some(s.handle()));
        assert_eq!(registry.inner.read().await[&1].role, Role::Student);
    }

    #[tokio::test]
    async fn reconnect_replaces_previous_session() {
        let registry = ConnectionRegistry::new();
        let (first, _rx1) = session();
        let (second, _rx2) = session();

        assert!(registry.register(7, Role::Lecturer, first.handle()).await.is_none());
        let evicted = registry.register(7, Role::Lecturer, second.handle()).await;

        assert_eq!(evicted, Some(first.handle()));
        assert_eq!(registry.count().await, 1);
        assert_eq!(registry.lookup(7).await, Some(second.handle()));
    }

    #[tokio::test]
    async fn unregister_is_a_no_op_when_absent() {
        let registry = ConnectionRegistry::new();
        assert!(registry.unregister(99).await.is_none());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn stale_session_cannot_unregister_its_replacement() {
        let registry = ConnectionRegistry::new();
        let (old, _rx1) = session();
        let (new, _rx2) = session();
        registry.register(4, Role::Student, old.handle()).await;
        registry.register(4, Role::Student, new.handle()).await;

        assert!(!registry.unregister_session(4, old.id()).await);
        assert!(registry.is_connected(4).await);

        assert!(registry.unregister_session(4, new.id()).await);
        assert!(!registry.is_connected(4).await);
    }
}
