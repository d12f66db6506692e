//! Shared HTTP plumbing for the hosted backend.
//!
//! One `SupabaseClient` is cloned into the auth adapter and both data
//! stores. Clones share the current session, so data requests carry the
//! signed-in user's bearer token and row-level security sees the right
//! identity. Without a session the anon key doubles as the bearer.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::config::BackendConfig;
use crate::domain::auth::AuthSession;

/// PostgREST media type for "exactly one row as a JSON object".
pub(crate) const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Handle on the hosted backend's auth and REST endpoints.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: SecretString,
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl SupabaseClient {
    /// Builds a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            anon_key: config.anon_key.clone(),
            session: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/auth/v1/<path>`
    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// `<base>/rest/v1/<table>`
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Request carrying the anon key and the current bearer token.
    pub(crate) async fn request(&self, method: Method, url: String) -> RequestBuilder {
        let bearer = match self.session.read().await.as_ref() {
            Some(session) => session.access_token.expose_secret().clone(),
            None => self.anon_key.expose_secret().clone(),
        };
        self.request_with_bearer(method, url, &bearer)
    }

    /// Request authorised by the anon key alone.
    pub(crate) fn anon_request(&self, method: Method, url: String) -> RequestBuilder {
        self.request_with_bearer(method, url, self.anon_key.expose_secret())
    }

    /// Request carrying the anon key and an explicit bearer token.
    pub(crate) fn request_with_bearer(&self, method: Method, url: String, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.expose_secret().as_str())
            .bearer_auth(bearer)
    }

    /// Session currently held.
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    /// Replaces the held session, returning the previous one.
    pub(crate) async fn replace_session(&self, session: Option<AuthSession>) -> Option<AuthSession> {
        std::mem::replace(&mut *self.session.write().await, session)
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
