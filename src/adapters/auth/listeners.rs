//! Listener registry backing `AuthClient::on_auth_state_change`.
//!
//! Both auth adapters keep their observers here. Delivery is sequential
//! and in registration order, so every listener sees events in the order
//! the adapter produced them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::adapters::lock;
use crate::domain::auth::{AuthChangeEvent, AuthSession};
use crate::ports::{AuthStateListener, Subscription, SubscriptionId};

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, Arc<dyn AuthStateListener>>,
}

/// Set of registered auth-state listeners.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener; dropping the returned handle removes it again.
    pub fn register(&self, listener: Arc<dyn AuthStateListener>) -> Subscription {
        let id = {
            let mut registry = lock::write(&self.inner);
            registry.next_id += 1;
            let id = SubscriptionId::new(registry.next_id);
            registry.listeners.insert(id, listener);
            id
        };
        tracing::debug!(subscription_id = %id, "auth listener registered");

        let registry = Arc::downgrade(&self.inner);
        Subscription::new(id, move || {
            if let Some(registry) = registry.upgrade() {
                lock::write(&registry).listeners.remove(&id);
                tracing::debug!(subscription_id = %id, "auth listener removed");
            }
        })
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        lock::read(&self.inner).listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers one event to every listener registered at call time.
    pub async fn notify(&self, event: AuthChangeEvent, session: Option<AuthSession>) {
        // Snapshot so the lock is released before awaiting listeners
        let listeners: Vec<Arc<dyn AuthStateListener>> =
            lock::read(&self.inner).listeners.values().cloned().collect();

        tracing::debug!(%event, listeners = listeners.len(), "dispatching auth event");

        for listener in listeners {
            listener.on_auth_state_change(event, session.clone()).await;
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::AuthUser;
    use crate::domain::foundation::UserId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        seen: Mutex<Vec<(AuthChangeEvent, Option<String>)>>,
    }

    #[async_trait]
    impl AuthStateListener for RecordingListener {
        async fn on_auth_state_change(&self, event: AuthChangeEvent, session: Option<AuthSession>) {
            self.seen
                .lock()
                .unwrap()
                .push((event, session.map(|s| s.user.id.to_string())));
        }
    }

    fn session(id: &str) -> AuthSession {
        AuthSession::new("token", AuthUser::new(UserId::new(id).unwrap(), None))
    }

    #[tokio::test]
    async fn notify_reaches_every_listener_in_order() {
        let registry = ListenerRegistry::new();
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        let _a = registry.register(first.clone());
        let _b = registry.register(second.clone());

        registry.notify(AuthChangeEvent::SignedIn, Some(session("u1"))).await;
        registry.notify(AuthChangeEvent::SignedOut, None).await;

        let expected = vec![
            (AuthChangeEvent::SignedIn, Some("u1".to_string())),
            (AuthChangeEvent::SignedOut, None),
        ];
        assert_eq!(*first.seen.lock().unwrap(), expected);
        assert_eq!(*second.seen.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn unsubscribed_listener_stops_receiving() {
        let registry = ListenerRegistry::new();
        let listener = Arc::new(RecordingListener::default());
        let subscription = registry.register(listener.clone());
        assert_eq!(registry.len(), 1);

        subscription.unsubscribe();
        registry.notify(AuthChangeEvent::SignedOut, None).await;

        assert!(registry.is_empty());
        assert!(listener.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dropping_handle_unregisters() {
        let registry = ListenerRegistry::new();
        {
            let _subscription = registry.register(Arc::new(RecordingListener::default()));
            assert_eq!(registry.len(), 1);
        }
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::new();
        let subscription = registry.register(Arc::new(RecordingListener::default()));
        drop(registry);
        subscription.unsubscribe();
    }
}
