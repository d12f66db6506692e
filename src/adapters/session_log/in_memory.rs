//! In-memory `user_sessions` table for testing.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::adapters::lock;
use crate::domain::foundation::{SessionLogId, Timestamp, UserId};
use crate::domain::session_log::{NewSessionLog, SessionLog};
use crate::ports::{DataError, SessionLogStore};

/// In-memory `SessionLogStore`.
///
/// Rows keep insertion order; `login_time` is stamped on insert the way
/// the backend's column default does.
#[derive(Debug, Default)]
pub struct InMemorySessionLogStore {
    rows: RwLock<Vec<SessionLog>>,
    /// Optional error to return for every call (for error testing)
    force_error: RwLock<Option<DataError>>,
}

impl InMemorySessionLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing row.
    pub fn with_row(self, row: SessionLog) -> Self {
        lock::write(&self.rows).push(row);
        self
    }

    pub fn with_error(self, error: DataError) -> Self {
        self.set_error(error);
        self
    }

    pub fn set_error(&self, error: DataError) {
        *lock::write(&self.force_error) = Some(error);
    }

    pub fn clear_error(&self) {
        *lock::write(&self.force_error) = None;
    }

    // === Test Helpers ===

    /// All rows in insertion order.
    pub fn rows(&self) -> Vec<SessionLog> {
        lock::read(&self.rows).clone()
    }

    /// Rows belonging to one user, in insertion order.
    pub fn rows_for(&self, user_id: &UserId) -> Vec<SessionLog> {
        lock::read(&self.rows)
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect()
    }

    fn forced_error(&self) -> Option<DataError> {
        lock::read(&self.force_error).clone()
    }
}

#[async_trait]
impl SessionLogStore for InMemorySessionLogStore {
    async fn insert(&self, entry: &NewSessionLog) -> Result<SessionLog, DataError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let row = SessionLog {
            id: SessionLogId::new(),
            user_id: entry.user_id.clone(),
            ip_address: entry.ip_address.clone(),
            login_time: Some(Timestamp::now()),
            logout_time: None,
            user_agent: entry.user_agent.clone(),
        };
        lock::write(&self.rows).push(row.clone());
        Ok(row)
    }

    async fn latest_open(&self, user_id: &UserId) -> Result<Option<SessionLog>, DataError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        // max_by_key keeps the last of equal keys, i.e. the newest insert
        Ok(lock::read(&self.rows)
            .iter()
            .filter(|row| &row.user_id == user_id && row.is_open())
            .max_by_key(|row| row.login_time)
            .cloned())
    }

    async fn set_logout_time(&self, id: &SessionLogId, logout_time: Timestamp) -> Result<(), DataError> {
        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        if let Some(row) = lock::write(&self.rows).iter_mut().find(|row| &row.id == id) {
            row.logout_time = Some(logout_time);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn insert_opens_row_with_login_time() {
        let store = InMemorySessionLogStore::new();

        let row = store
            .insert(&NewSessionLog::new(user("u1"), "10.0.0.1", Some("curl/8".into())))
            .await
            .unwrap();

        assert!(row.is_open());
        assert!(row.login_time.is_some());
        assert_eq!(store.rows(), vec![row]);
    }

    #[tokio::test]
    async fn latest_open_picks_newest_open_row_for_user() {
        let older = SessionLog {
            id: SessionLogId::new(),
            user_id: user("u1"),
            ip_address: "1.1.1.1".into(),
            login_time: Timestamp::from_unix_secs(1_000),
            logout_time: None,
            user_agent: None,
        };
        let newer = SessionLog {
            id: SessionLogId::new(),
            login_time: Timestamp::from_unix_secs(2_000),
            ..older.clone()
        };
        let closed = SessionLog {
            id: SessionLogId::new(),
            login_time: Timestamp::from_unix_secs(3_000),
            logout_time: Timestamp::from_unix_secs(3_500),
            ..older.clone()
        };
        let other_user = SessionLog {
            id: SessionLogId::new(),
            user_id: user("u2"),
            login_time: Timestamp::from_unix_secs(4_000),
            ..older.clone()
        };
        let store = InMemorySessionLogStore::new()
            .with_row(newer.clone())
            .with_row(older)
            .with_row(closed)
            .with_row(other_user);

        let latest = store.latest_open(&user("u1")).await.unwrap();

        assert_eq!(latest.map(|r| r.id), Some(newer.id));
    }

    #[tokio::test]
    async fn latest_open_is_none_when_all_closed() {
        let store = InMemorySessionLogStore::new();
        let row = store
            .insert(&NewSessionLog::new(user("u1"), "10.0.0.1", None))
            .await
            .unwrap();
        store.set_logout_time(&row.id, Timestamp::now()).await.unwrap();

        assert!(store.latest_open(&user("u1")).await.unwrap().is_none());
        assert!(!store.rows_for(&user("u1"))[0].is_open());
    }

    #[tokio::test]
    async fn forced_error_fails_every_call() {
        let store = InMemorySessionLogStore::new().with_error(DataError::service_unavailable("down"));

        assert!(store
            .insert(&NewSessionLog::new(user("u1"), "10.0.0.1", None))
            .await
            .is_err());
        assert!(store.latest_open(&user("u1")).await.is_err());
        assert!(store.rows().is_empty());
    }
}
