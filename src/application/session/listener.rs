//! Bridge from the auth client's change stream into the session core.

use std::sync::Weak;

use async_trait::async_trait;

use super::manager::SessionCore;
use crate::domain::auth::{AuthChangeEvent, AuthSession};
use crate::ports::AuthStateListener;

/// Listener registered by the session manager.
///
/// Holds the core weakly so a registration that outlives the manager
/// cannot keep its state alive.
pub(crate) struct SessionListener {
    core: Weak<SessionCore>,
}

impl SessionListener {
    pub(crate) fn new(core: Weak<SessionCore>) -> Self {
        Self { core }
    }
}

#[async_trait]
impl AuthStateListener for SessionListener {
    async fn on_auth_state_change(&self, event: AuthChangeEvent, session: Option<AuthSession>) {
        let Some(core) = self.core.upgrade() else {
            return;
        };
        tracing::debug!(%event, signed_in = session.is_some(), "auth state changed");
        core.handle_auth_change(session).await;
    }
}
