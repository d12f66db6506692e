//! SessionLogStore port for the `user_sessions` audit table

use async_trait::async_trait;

use super::DataError;
use crate::domain::{
    foundation::{SessionLogId, Timestamp, UserId},
    session_log::{NewSessionLog, SessionLog},
};

/// Row-level access to login audit rows.
#[async_trait]
pub trait SessionLogStore: Send + Sync {
    /// Insert a new open login interval.
    async fn insert(&self, entry: &NewSessionLog) -> Result<SessionLog, DataError>;

    /// The user's open rows ordered newest-first by login time; the first
    /// one, or `None` when every row has been closed.
    async fn latest_open(&self, user_id: &UserId) -> Result<Option<SessionLog>, DataError>;

    /// Stamp a row with its logout time.
    async fn set_logout_time(&self, id: &SessionLogId, logout_time: Timestamp) -> Result<(), DataError>;
}
