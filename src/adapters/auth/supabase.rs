//! Hosted auth adapter (GoTrue REST API).
//!
//! Implements the `AuthClient` port over `/auth/v1`:
//!
//! - `POST /signup` with profile metadata under `data`
//! - `POST /token?grant_type=password`
//! - `POST /token?grant_type=refresh_token` when the held session expired
//! - `POST /logout`
//!
//! The session lives in the shared [`SupabaseClient`], so data adapters
//! built from the same client pick up the signed-in bearer token. Listeners
//! are notified after the session is stored and before the call returns.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::ListenerRegistry;
use crate::adapters::supabase::{auth_error, read_auth, SupabaseClient};
use crate::domain::auth::{
    AuthChangeEvent, AuthError, AuthSession, AuthUser, PasswordCredentials, SignUpMetadata,
    SignUpPayload,
};
use crate::domain::foundation::Timestamp;
use crate::ports::{AuthClient, AuthStateListener, Subscription};

/// Successful token grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry in unix seconds.
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self, now: Timestamp) -> AuthSession {
        let expires_at = self
            .expires_at
            .and_then(Timestamp::from_unix_secs)
            .or_else(|| self.expires_in.map(|secs| now.plus_secs(secs)));

        let mut session = AuthSession::new(self.access_token, self.user);
        session.refresh_token = self.refresh_token.map(SecretString::new);
        session.expires_at = expires_at;
        session
    }
}

/// Sign-up answers with a session when email confirmation is off, and with
/// the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpMetadata,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

/// `AuthClient` backed by the hosted auth service.
#[derive(Debug, Clone)]
pub struct SupabaseAuthClient {
    client: SupabaseClient,
    listeners: ListenerRegistry,
}

impl SupabaseAuthClient {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Installs a previously persisted session without notifying listeners.
    pub async fn restore_session(&self, session: AuthSession) {
        self.client.replace_session(Some(session)).await;
    }

    fn sign_up_request(&self, payload: &SignUpPayload) -> RequestBuilder {
        let body = SignUpBody {
            email: &payload.email,
            password: &payload.password,
            data: &payload.options.data,
        };
        self.client
            .anon_request(Method::POST, self.client.auth_url("signup"))
            .json(&body)
    }

    fn password_grant_request(&self, credentials: &PasswordCredentials) -> RequestBuilder {
        self.client
            .anon_request(Method::POST, self.client.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(credentials)
    }

    fn refresh_grant_request(&self, refresh_token: &SecretString) -> RequestBuilder {
        self.client
            .anon_request(Method::POST, self.client.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshBody {
                refresh_token: refresh_token.expose_secret(),
            })
    }

    fn logout_request(&self, session: &AuthSession) -> RequestBuilder {
        self.client.request_with_bearer(
            Method::POST,
            self.client.auth_url("logout"),
            session.access_token.expose_secret(),
        )
    }

    /// Stores the session and tells listeners about it.
    async fn install(&self, event: AuthChangeEvent, session: Option<AuthSession>) {
        self.client.replace_session(session.clone()).await;
        self.listeners.notify(event, session).await;
    }

    async fn refresh(&self, refresh_token: &SecretString) -> Result<AuthSession, AuthError> {
        let response = self
            .refresh_grant_request(refresh_token)
            .send()
            .await
            .map_err(transport_error)?;
        let token: TokenResponse = read_auth(response).await?;
        Ok(token.into_session(Timestamp::now()))
    }
}

fn transport_error(error: reqwest::Error) -> AuthError {
    tracing::warn!(error = %error, "auth service unreachable");
    AuthError::service_unavailable(error.to_string())
}

#[async_trait]
impl AuthClient for SupabaseAuthClient {
    async fn get_current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        let Some(session) = self.client.session().await else {
            return Ok(None);
        };
        if !session.is_expired_at(Timestamp::now()) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.clone() else {
            tracing::debug!(user_id = %session.user_id(), "session expired without refresh token");
            self.install(AuthChangeEvent::SignedOut, None).await;
            return Ok(None);
        };

        match self.refresh(&refresh_token).await {
            Ok(refreshed) => {
                tracing::debug!(user_id = %refreshed.user_id(), "session refreshed");
                self.install(AuthChangeEvent::TokenRefreshed, Some(refreshed.clone()))
                    .await;
                Ok(Some(refreshed))
            }
            Err(error @ AuthError::Api { .. }) => {
                tracing::warn!(error = %error, "refresh token rejected, dropping session");
                self.install(AuthChangeEvent::SignedOut, None).await;
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn on_auth_state_change(&self, listener: Arc<dyn AuthStateListener>) -> Subscription {
        self.listeners.register(listener)
    }

    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), AuthError> {
        let response = self
            .sign_up_request(payload)
            .send()
            .await
            .map_err(transport_error)?;

        match read_auth(response).await? {
            SignUpResponse::Session(token) => {
                let session = token.into_session(Timestamp::now());
                tracing::debug!(user_id = %session.user_id(), "account created and signed in");
                self.install(AuthChangeEvent::SignedIn, Some(session)).await;
            }
            SignUpResponse::User(user) => {
                tracing::debug!(user_id = %user.id, "account created, awaiting confirmation");
            }
        }
        Ok(())
    }

    async fn sign_in_with_password(&self, credentials: &PasswordCredentials) -> Result<(), AuthError> {
        let response = self
            .password_grant_request(credentials)
            .send()
            .await
            .map_err(transport_error)?;

        let token: TokenResponse = read_auth(response).await?;
        let session = token.into_session(Timestamp::now());
        tracing::debug!(user_id = %session.user_id(), "password sign-in succeeded");
        self.install(AuthChangeEvent::SignedIn, Some(session)).await;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.client.session().await {
            let response = self
                .logout_request(&session)
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            // An already-revoked token still counts as signed out
            let revoked = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND);
            if !status.is_success() && !revoked {
                let body = response.text().await.unwrap_or_default();
                return Err(auth_error(status, &body));
            }
        }

        self.install(AuthChangeEvent::SignedOut, None).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use crate::domain::auth::SignUpRequest;
    use crate::domain::foundation::UserId;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn auth_client() -> SupabaseAuthClient {
        let client =
            SupabaseClient::new(&BackendConfig::new("https://project.supabase.co", "anon-key")).unwrap();
        SupabaseAuthClient::new(client)
    }

    fn body_json(request: &reqwest::Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    fn user_json() -> Value {
        json!({ "id": "8d1e", "email": "jane@example.com", "user_metadata": {} })
    }

    #[test]
    fn sign_up_sends_metadata_under_data() {
        let payload = SignUpRequest {
            email: "jane@example.com".into(),
            password: "S3cure!pw".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            mobile_number: "+1234567890".into(),
        }
        .to_payload();

        let request = auth_client().sign_up_request(&payload).build().unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "https://project.supabase.co/auth/v1/signup");
        assert_eq!(
            body_json(&request),
            json!({
                "email": "jane@example.com",
                "password": "S3cure!pw",
                "data": {
                    "first_name": "Jane",
                    "last_name": "Doe",
                    "date_of_birth": "1990-01-01",
                    "mobile_number": "+1234567890"
                }
            })
        );
    }

    #[test]
    fn password_grant_posts_credentials_only() {
        let credentials = PasswordCredentials {
            email: "jane@example.com".into(),
            password: "S3cure!pw".into(),
        };

        let request = auth_client()
            .password_grant_request(&credentials)
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(
            body_json(&request),
            json!({ "email": "jane@example.com", "password": "S3cure!pw" })
        );
        assert_eq!(request.headers()["apikey"], "anon-key");
    }

    #[test]
    fn refresh_grant_sends_refresh_token() {
        let token = SecretString::new("refresh-me".to_string());

        let request = auth_client().refresh_grant_request(&token).build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/auth/v1/token?grant_type=refresh_token"
        );
        assert_eq!(body_json(&request), json!({ "refresh_token": "refresh-me" }));
    }

    #[test]
    fn logout_uses_session_bearer() {
        let session = AuthSession::new("user-jwt", AuthUser::new(UserId::new("u1").unwrap(), None));

        let request = auth_client().logout_request(&session).build().unwrap();

        assert_eq!(request.url().as_str(), "https://project.supabase.co/auth/v1/logout");
        assert_eq!(request.headers()["authorization"], "Bearer user-jwt");
    }

    #[test]
    fn token_response_prefers_absolute_expiry() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1_700_000_000,
            "refresh_token": "r1",
            "user": user_json()
        }))
        .unwrap();

        let session = token.into_session(Timestamp::from_unix_secs(0).unwrap());

        assert_eq!(session.user_id().as_str(), "8d1e");
        assert_eq!(session.expires_at.map(|t| t.as_unix_secs()), Some(1_700_000_000));
        assert_eq!(session.refresh_token.unwrap().expose_secret(), "r1");
    }

    #[test]
    fn token_response_derives_expiry_from_lifetime() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "jwt",
            "expires_in": 3600,
            "user": user_json()
        }))
        .unwrap();

        let session = token.into_session(Timestamp::from_unix_secs(1_000).unwrap());

        assert_eq!(session.expires_at.map(|t| t.as_unix_secs()), Some(4_600));
    }

    #[test]
    fn sign_up_response_distinguishes_session_from_user() {
        let with_session: SignUpResponse =
            serde_json::from_value(json!({ "access_token": "jwt", "user": user_json() })).unwrap();
        let user_only: SignUpResponse = serde_json::from_value(user_json()).unwrap();

        assert!(matches!(with_session, SignUpResponse::Session(_)));
        assert!(matches!(user_only, SignUpResponse::User(_)));
    }

    #[tokio::test]
    async fn unexpired_session_is_returned_without_network() {
        let auth = auth_client();
        let session = AuthSession::new("jwt", AuthUser::new(UserId::new("u1").unwrap(), None))
            .with_expires_at(Timestamp::now().plus_secs(3600));
        auth.restore_session(session).await;

        let current = auth.get_current_session().await.unwrap().unwrap();

        assert_eq!(current.user_id().as_str(), "u1");
    }

    #[tokio::test]
    async fn expired_session_without_refresh_token_signs_out() {
        let auth = auth_client();
        let session = AuthSession::new("jwt", AuthUser::new(UserId::new("u1").unwrap(), None))
            .with_expires_at(Timestamp::from_unix_secs(1).unwrap());
        auth.restore_session(session).await;

        assert!(auth.get_current_session().await.unwrap().is_none());
        assert!(auth.client.session().await.is_none());
    }

    #[tokio::test]
    async fn sign_out_without_session_is_local() {
        let auth = auth_client();
        assert!(auth.sign_out().await.is_ok());
    }
}
