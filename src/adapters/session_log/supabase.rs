//! Login audit store over the hosted REST API (`/rest/v1/user_sessions`).

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

use crate::adapters::supabase::{expect_data_success, read_data, transport_error, SupabaseClient};
use crate::domain::foundation::{SessionLogId, Timestamp, UserId};
use crate::domain::schema::Table;
use crate::domain::session_log::{NewSessionLog, SessionLog};
use crate::ports::{DataError, SessionLogStore};

#[derive(Serialize)]
struct LogoutStamp {
    logout_time: Timestamp,
}

/// `SessionLogStore` backed by the hosted `user_sessions` table.
#[derive(Debug, Clone)]
pub struct SupabaseSessionLogStore {
    client: SupabaseClient,
}

impl SupabaseSessionLogStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn table_url(&self) -> String {
        self.client.rest_url(Table::UserSessions.name())
    }

    async fn insert_request(&self, entry: &NewSessionLog) -> RequestBuilder {
        self.client
            .request(Method::POST, self.table_url())
            .await
            .header("Prefer", "return=representation")
            .json(entry)
    }

    async fn latest_open_request(&self, user_id: &UserId) -> RequestBuilder {
        self.client
            .request(Method::GET, self.table_url())
            .await
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("logout_time", "is.null".to_string()),
                ("order", "login_time.desc".to_string()),
                ("limit", "1".to_string()),
                ("select", "*".to_string()),
            ])
    }

    async fn logout_request(&self, id: &SessionLogId, logout_time: Timestamp) -> RequestBuilder {
        self.client
            .request(Method::PATCH, self.table_url())
            .await
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(&LogoutStamp { logout_time })
    }
}

#[async_trait]
impl SessionLogStore for SupabaseSessionLogStore {
    async fn insert(&self, entry: &NewSessionLog) -> Result<SessionLog, DataError> {
        let response = self
            .insert_request(entry)
            .await
            .send()
            .await
            .map_err(transport_error)?;

        let rows: Vec<SessionLog> = read_data(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DataError::InvalidResponse("insert returned no rows".to_string()))
    }

    async fn latest_open(&self, user_id: &UserId) -> Result<Option<SessionLog>, DataError> {
        let response = self
            .latest_open_request(user_id)
            .await
            .send()
            .await
            .map_err(transport_error)?;

        let rows: Vec<SessionLog> = read_data(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn set_logout_time(&self, id: &SessionLogId, logout_time: Timestamp) -> Result<(), DataError> {
        let response = self
            .logout_request(id, logout_time)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        expect_data_success(response).await
    }
}
