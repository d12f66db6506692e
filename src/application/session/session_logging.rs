//! Login audit writes made on behalf of the session manager.
//!
//! Every failure here is logged and swallowed: an audit row that could not
//! be written never fails sign-in or sign-out.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::session_log::NewSessionLog;
use crate::ports::SessionLogStore;

/// Writes `user_sessions` rows at sign-in and sign-out.
#[derive(Clone)]
pub struct SessionLogger {
    store: Arc<dyn SessionLogStore>,
}

impl SessionLogger {
    pub fn new(store: Arc<dyn SessionLogStore>) -> Self {
        Self { store }
    }

    /// Opens a login interval for `user_id`. Skipped when nobody is signed in.
    pub async fn record_login(&self, user_id: Option<&UserId>, ip_address: &str, user_agent: Option<&str>) {
        let Some(user_id) = user_id else {
            tracing::debug!("no current user, session log entry skipped");
            return;
        };

        let entry = NewSessionLog::new(user_id.clone(), ip_address, user_agent.map(str::to_string));
        match self.store.insert(&entry).await {
            Ok(row) => tracing::debug!(user_id = %user_id, session_log_id = %row.id, "login recorded"),
            Err(e) => tracing::error!(user_id = %user_id, error = %e, "failed to record login"),
        }
    }

    /// Closes the newest open login interval for `user_id`, if there is one.
    pub async fn record_logout(&self, user_id: &UserId) {
        let open = match self.store.latest_open(user_id).await {
            Ok(open) => open,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "failed to look up open session log");
                return;
            }
        };

        let Some(row) = open else {
            tracing::debug!(user_id = %user_id, "no open session log to close");
            return;
        };

        match self.store.set_logout_time(&row.id, Timestamp::now()).await {
            Ok(()) => tracing::debug!(user_id = %user_id, session_log_id = %row.id, "logout recorded"),
            Err(e) => tracing::error!(user_id = %user_id, error = %e, "failed to record logout"),
        }
    }
}

impl std::fmt::Debug for SessionLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLogger").finish_non_exhaustive()
    }
}
