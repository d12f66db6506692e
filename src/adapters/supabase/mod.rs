//! Hosted backend wiring.
//!
//! `SupabaseBackend` builds the auth client and both data stores around a
//! single [`SupabaseClient`], so they share one session.
//!
//! # Example
//!
//! ```ignore
//! let backend = SupabaseBackend::connect(&config.backend)?;
//! let manager = SessionManager::start(backend.auth(), backend.profiles(), backend.session_logs());
//! ```

mod client;
mod error;

pub use client::SupabaseClient;

pub(crate) use client::SINGLE_OBJECT;
pub(crate) use error::{auth_error, expect_data_success, read_auth, read_data, transport_error};

use std::sync::Arc;

use crate::adapters::auth::SupabaseAuthClient;
use crate::adapters::profile::SupabaseProfileStore;
use crate::adapters::session_log::SupabaseSessionLogStore;
use crate::config::BackendConfig;

/// Auth client plus data stores for one hosted project.
#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    auth: Arc<SupabaseAuthClient>,
    profiles: Arc<SupabaseProfileStore>,
    session_logs: Arc<SupabaseSessionLogStore>,
}

impl SupabaseBackend {
    /// Builds the adapters for the configured project.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn connect(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::from_client(SupabaseClient::new(config)?))
    }

    pub fn from_client(client: SupabaseClient) -> Self {
        Self {
            auth: Arc::new(SupabaseAuthClient::new(client.clone())),
            profiles: Arc::new(SupabaseProfileStore::new(client.clone())),
            session_logs: Arc::new(SupabaseSessionLogStore::new(client)),
        }
    }

    pub fn auth(&self) -> Arc<SupabaseAuthClient> {
        Arc::clone(&self.auth)
    }

    pub fn profiles(&self) -> Arc<SupabaseProfileStore> {
        Arc::clone(&self.profiles)
    }

    pub fn session_logs(&self) -> Arc<SupabaseSessionLogStore> {
        Arc::clone(&self.session_logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::{AuthSession, AuthUser};
    use crate::domain::foundation::UserId;
    use crate::ports::AuthClient;

    #[tokio::test]
    async fn adapters_share_one_session() {
        let backend =
            SupabaseBackend::connect(&BackendConfig::new("https://project.supabase.co", "anon-key")).unwrap();
        let user = AuthUser::new(UserId::new("u1").unwrap(), None);

        backend.auth().restore_session(AuthSession::new("jwt", user)).await;

        let session = backend.auth().get_current_session().await.unwrap();
        assert_eq!(session.map(|s| s.user.id), Some(UserId::new("u1").unwrap()));
    }
}
