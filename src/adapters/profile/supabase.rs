//! Profile store over the hosted REST API (`/rest/v1/profiles`).

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};

use crate::adapters::supabase::{expect_data_success, read_data, transport_error, SupabaseClient, SINGLE_OBJECT};
use crate::domain::foundation::UserId;
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::domain::schema::Table;
use crate::ports::{DataError, ProfileStore};

/// `ProfileStore` backed by the hosted `profiles` table.
#[derive(Debug, Clone)]
pub struct SupabaseProfileStore {
    client: SupabaseClient,
}

impl SupabaseProfileStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn table_url(&self) -> String {
        self.client.rest_url(Table::Profiles.name())
    }

    async fn fetch_request(&self, user_id: &UserId) -> RequestBuilder {
        self.client
            .request(Method::GET, self.table_url())
            .await
            .query(&[("id", eq(user_id)), ("select", "*".to_string())])
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
    }

    async fn update_request(&self, user_id: &UserId, update: &ProfileUpdate) -> RequestBuilder {
        self.client
            .request(Method::PATCH, self.table_url())
            .await
            .query(&[("id", eq(user_id))])
            .header("Prefer", "return=minimal")
            .json(update)
    }
}

fn eq(user_id: &UserId) -> String {
    format!("eq.{}", user_id)
}

#[async_trait]
impl ProfileStore for SupabaseProfileStore {
    async fn fetch_by_id(&self, user_id: &UserId) -> Result<Profile, DataError> {
        let response = self
            .fetch_request(user_id)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        read_data(response).await
    }

    async fn update_by_id(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DataError> {
        let response = self
            .update_request(user_id, update)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        expect_data_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use serde_json::{json, Value};

    fn store() -> SupabaseProfileStore {
        let client =
            SupabaseClient::new(&BackendConfig::new("https://project.supabase.co", "anon-key")).unwrap();
        SupabaseProfileStore::new(client)
    }

    fn user_id() -> UserId {
        UserId::new("8d1e").unwrap()
    }

    #[tokio::test]
    async fn fetch_selects_single_row_by_id() {
        let request = store().fetch_request(&user_id()).await.build().unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/rest/v1/profiles?id=eq.8d1e&select=*"
        );
        assert_eq!(request.headers()["accept"], SINGLE_OBJECT);
    }

    #[tokio::test]
    async fn update_patches_only_set_fields() {
        let update = ProfileUpdate::new().first_name("Janet");

        let request = store().update_request(&user_id(), &update).await.build().unwrap();

        assert_eq!(request.method(), &Method::PATCH);
        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/rest/v1/profiles?id=eq.8d1e"
        );
        assert_eq!(request.headers()["prefer"], "return=minimal");
        let body: Value =
            serde_json::from_slice(request.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(body, json!({ "first_name": "Janet" }));
    }
}
