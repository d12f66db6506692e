//! Mock auth client for testing.
//!
//! Implements the `AuthClient` port against an in-process account table,
//! so the session manager can be exercised without a hosted backend.
//! Sign-in and sign-out notify listeners before returning, the same way
//! the hosted client does.
//!
//! # Example
//!
//! ```ignore
//! use furlink::adapters::auth::MockAuthClient;
//! use furlink::domain::auth::AuthUser;
//! use furlink::domain::foundation::UserId;
//!
//! let auth = MockAuthClient::new().with_account(
//!     "jane@example.com",
//!     "S3cure!pw",
//!     AuthUser::new(UserId::new("user-123").unwrap(), Some("jane@example.com".into())),
//! );
//!
//! auth.sign_in_with_password(&credentials).await?;
//! assert_eq!(auth.sign_in_calls().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::ListenerRegistry;
use crate::adapters::lock;
use crate::domain::auth::{
    AuthChangeEvent, AuthError, AuthSession, AuthUser, PasswordCredentials, SignUpPayload,
};
use crate::domain::foundation::UserId;
use crate::ports::{AuthClient, AuthStateListener, Subscription};

#[derive(Debug, Clone)]
struct MockAccount {
    password: String,
    user: AuthUser,
}

/// Mock auth client for testing.
///
/// Accounts are keyed by email. Unknown emails or wrong passwords fail with
/// the backend's "Invalid login credentials" message.
#[derive(Debug, Default)]
pub struct MockAuthClient {
    accounts: RwLock<HashMap<String, MockAccount>>,
    session: RwLock<Option<AuthSession>>,
    listeners: ListenerRegistry,
    /// Error returned by sign-up, sign-in and sign-out (for error testing)
    force_error: RwLock<Option<AuthError>>,
    /// Error returned by `get_current_session`
    session_error: RwLock<Option<AuthError>>,
    /// Whether sign-up also opens a session (email confirmation disabled)
    auto_confirm: AtomicBool,
    sign_up_calls: RwLock<Vec<SignUpPayload>>,
    sign_in_calls: RwLock<Vec<PasswordCredentials>>,
    sign_out_calls: AtomicUsize,
}

impl MockAuthClient {
    /// Creates a client with no accounts and no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account that can sign in with `password`.
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>, user: AuthUser) -> Self {
        self.add_account(email, password, user);
        self
    }

    /// Starts with a persisted session, as if restored from storage.
    pub fn with_session(self, session: AuthSession) -> Self {
        *lock::write(&self.session) = Some(session);
        self
    }

    /// Forces sign-up, sign-in and sign-out to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        self.set_error(error);
        self
    }

    pub fn set_error(&self, error: AuthError) {
        *lock::write(&self.force_error) = Some(error);
    }

    /// Forces `get_current_session` to fail with `error`.
    pub fn with_session_error(self, error: AuthError) -> Self {
        *lock::write(&self.session_error) = Some(error);
        self
    }

    /// Makes a successful sign-up also sign the new account in.
    pub fn with_auto_confirm(self) -> Self {
        self.auto_confirm.store(true, Ordering::SeqCst);
        self
    }

    /// Clears forced errors and returns to normal operation.
    pub fn clear_error(&self) {
        *lock::write(&self.force_error) = None;
        *lock::write(&self.session_error) = None;
    }

    /// Registers an account at runtime.
    pub fn add_account(&self, email: impl Into<String>, password: impl Into<String>, user: AuthUser) {
        lock::write(&self.accounts).insert(
            email.into(),
            MockAccount {
                password: password.into(),
                user,
            },
        );
    }

    /// Pushes an event to listeners as the backend would, updating the held
    /// session to match.
    pub async fn emit(&self, event: AuthChangeEvent, session: Option<AuthSession>) {
        *lock::write(&self.session) = session.clone();
        self.listeners.notify(event, session).await;
    }

    // === Test Helpers ===

    /// Session currently held, without going through the port.
    pub fn current_session(&self) -> Option<AuthSession> {
        lock::read(&self.session).clone()
    }

    /// User registered under `email`, if any.
    pub fn account(&self, email: &str) -> Option<AuthUser> {
        lock::read(&self.accounts).get(email).map(|a| a.user.clone())
    }

    pub fn sign_up_calls(&self) -> Vec<SignUpPayload> {
        lock::read(&self.sign_up_calls).clone()
    }

    pub fn sign_in_calls(&self) -> Vec<PasswordCredentials> {
        lock::read(&self.sign_in_calls).clone()
    }

    pub fn sign_out_count(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    /// Number of live listener registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn forced_error(&self) -> Option<AuthError> {
        lock::read(&self.force_error).clone()
    }

    async fn open_session(&self, user: AuthUser) {
        let session = AuthSession::new(format!("mock-access-{}", Uuid::new_v4()), user)
            .with_refresh_token(format!("mock-refresh-{}", Uuid::new_v4()));
        self.emit(AuthChangeEvent::SignedIn, Some(session)).await;
    }
}

#[async_trait]
impl AuthClient for MockAuthClient {
    async fn get_current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        if let Some(error) = lock::read(&self.session_error).clone() {
            return Err(error);
        }
        Ok(self.current_session())
    }

    fn on_auth_state_change(&self, listener: Arc<dyn AuthStateListener>) -> Subscription {
        self.listeners.register(listener)
    }

    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), AuthError> {
        lock::write(&self.sign_up_calls).push(payload.clone());

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        if lock::read(&self.accounts).contains_key(&payload.email) {
            return Err(AuthError::api("User already registered")
                .with_status(422)
                .with_code("user_already_exists"));
        }

        let id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        let mut user = AuthUser::new(id, Some(payload.email.clone()));
        user.user_metadata = match serde_json::to_value(&payload.options.data) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        self.add_account(payload.email.clone(), payload.password.clone(), user.clone());
        tracing::debug!(user_id = %user.id, "mock account created");

        if self.auto_confirm.load(Ordering::SeqCst) {
            self.open_session(user).await;
        }
        Ok(())
    }

    async fn sign_in_with_password(&self, credentials: &PasswordCredentials) -> Result<(), AuthError> {
        lock::write(&self.sign_in_calls).push(credentials.clone());

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        let user = lock::read(&self.accounts)
            .get(&credentials.email)
            .filter(|account| account.password == credentials.password)
            .map(|account| account.user.clone());

        match user {
            Some(user) => {
                self.open_session(user).await;
                Ok(())
            }
            None => Err(AuthError::api("Invalid login credentials")
                .with_status(400)
                .with_code("invalid_credentials")),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        self.emit(AuthChangeEvent::SignedOut, None).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::SignUpRequest;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EventLog {
        events: Mutex<Vec<AuthChangeEvent>>,
    }

    #[async_trait]
    impl AuthStateListener for EventLog {
        async fn on_auth_state_change(&self, event: AuthChangeEvent, _session: Option<AuthSession>) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn jane() -> AuthUser {
        AuthUser::new(UserId::new("user-123").unwrap(), Some("jane@example.com".into()))
    }

    fn credentials(password: &str) -> PasswordCredentials {
        PasswordCredentials {
            email: "jane@example.com".to_string(),
            password: password.to_string(),
        }
    }

    fn sign_up_request(email: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "S3cure!pw".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            mobile_number: "+15550100".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_in_with_valid_credentials_emits_signed_in() {
        let auth = MockAuthClient::new().with_account("jane@example.com", "S3cure!pw", jane());
        let log = Arc::new(EventLog::default());
        let _subscription = auth.on_auth_state_change(log.clone());

        auth.sign_in_with_password(&credentials("S3cure!pw")).await.unwrap();

        assert_eq!(*log.events.lock().unwrap(), vec![AuthChangeEvent::SignedIn]);
        let session = auth.get_current_session().await.unwrap().unwrap();
        assert_eq!(session.user_id().as_str(), "user-123");
    }

    #[tokio::test]
    async fn sign_in_with_wrong_password_fails_without_event() {
        let auth = MockAuthClient::new().with_account("jane@example.com", "S3cure!pw", jane());
        let log = Arc::new(EventLog::default());
        let _subscription = auth.on_auth_state_change(log.clone());

        let err = auth.sign_in_with_password(&credentials("nope")).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(log.events.lock().unwrap().is_empty());
        assert!(auth.current_session().is_none());
        assert_eq!(auth.sign_in_calls().len(), 1);
    }

    #[tokio::test]
    async fn sign_out_clears_session_and_emits() {
        let auth = MockAuthClient::new().with_session(AuthSession::new("token", jane()));
        let log = Arc::new(EventLog::default());
        let _subscription = auth.on_auth_state_change(log.clone());

        auth.sign_out().await.unwrap();

        assert!(auth.current_session().is_none());
        assert_eq!(auth.sign_out_count(), 1);
        assert_eq!(*log.events.lock().unwrap(), vec![AuthChangeEvent::SignedOut]);
    }

    #[tokio::test]
    async fn sign_up_records_payload_and_creates_account() {
        let auth = MockAuthClient::new();
        let payload = sign_up_request("new@example.com").to_payload();

        auth.sign_up(&payload).await.unwrap();

        assert_eq!(auth.sign_up_calls(), vec![payload]);
        let user = auth.account("new@example.com").unwrap();
        assert_eq!(user.metadata_str("first_name"), Some("Jane"));
        assert_eq!(user.metadata_str("date_of_birth"), Some("1990-04-12"));
        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn sign_up_with_auto_confirm_signs_in() {
        let auth = MockAuthClient::new().with_auto_confirm();
        let log = Arc::new(EventLog::default());
        let _subscription = auth.on_auth_state_change(log.clone());

        auth.sign_up(&sign_up_request("new@example.com").to_payload()).await.unwrap();

        assert_eq!(*log.events.lock().unwrap(), vec![AuthChangeEvent::SignedIn]);
        assert!(auth.current_session().is_some());
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let auth = MockAuthClient::new().with_account("jane@example.com", "S3cure!pw", jane());

        let err = auth
            .sign_up(&sign_up_request("jane@example.com").to_payload())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User already registered");
    }

    #[tokio::test]
    async fn forced_error_is_returned_until_cleared() {
        let auth = MockAuthClient::new()
            .with_account("jane@example.com", "S3cure!pw", jane())
            .with_error(AuthError::service_unavailable("down"));

        assert!(auth.sign_in_with_password(&credentials("S3cure!pw")).await.is_err());

        auth.clear_error();
        assert!(auth.sign_in_with_password(&credentials("S3cure!pw")).await.is_ok());
    }

    #[tokio::test]
    async fn session_error_only_affects_session_lookup() {
        let auth = MockAuthClient::new().with_session_error(AuthError::service_unavailable("down"));

        assert!(auth.get_current_session().await.is_err());
        assert!(auth.sign_out().await.is_ok());
    }

    #[tokio::test]
    async fn dropped_subscription_stops_delivery() {
        let auth = MockAuthClient::new();
        let log = Arc::new(EventLog::default());
        let subscription = auth.on_auth_state_change(log.clone());
        assert_eq!(auth.listener_count(), 1);

        drop(subscription);
        auth.emit(AuthChangeEvent::SignedOut, None).await;

        assert_eq!(auth.listener_count(), 0);
        assert!(log.events.lock().unwrap().is_empty());
    }
}
