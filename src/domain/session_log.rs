//! Login audit trail (`user_sessions` table).
//!
//! One row per login interval. The row is opened when a password sign-in
//! succeeds and stamped with a logout time on sign-out.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionLogId, Timestamp, UserId};

/// A `user_sessions` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    pub id: SessionLogId,
    pub user_id: UserId,
    pub ip_address: String,
    /// Set by the backend on insert.
    #[serde(default)]
    pub login_time: Option<Timestamp>,
    #[serde(default)]
    pub logout_time: Option<Timestamp>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl SessionLog {
    /// A row is open until it has been stamped with a logout time.
    pub fn is_open(&self) -> bool {
        self.logout_time.is_none()
    }
}

/// Insert payload for a new login interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSessionLog {
    pub user_id: UserId,
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl NewSessionLog {
    pub fn new(user_id: UserId, ip_address: impl Into<String>, user_agent: Option<String>) -> Self {
        Self {
            user_id,
            ip_address: ip_address.into(),
            user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_session_log_sends_null_user_agent() {
        let entry = NewSessionLog::new(UserId::new("u1").unwrap(), "10.0.0.1", None);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "user_id": "u1", "ip_address": "10.0.0.1", "user_agent": null })
        );
    }

    #[test]
    fn row_without_logout_time_is_open() {
        let row: SessionLog = serde_json::from_value(json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "user_id": "u1",
            "ip_address": "10.0.0.1",
            "login_time": "2024-05-01T08:00:00+00:00",
            "logout_time": null,
            "user_agent": "Mozilla/5.0"
        }))
        .unwrap();

        assert!(row.is_open());

        let closed = SessionLog {
            logout_time: Some(Timestamp::now()),
            ..row
        };
        assert!(!closed.is_open());
    }
}
