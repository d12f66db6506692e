//! Identity and session types handed out by the auth backend.
//!
//! These types have **no provider dependencies**. The Supabase adapter
//! decodes its token responses into them, the in-memory adapter builds
//! them directly.
//!
//! The session is a credential bundle the client never inspects beyond
//! the identity it carries and its expiry; tokens are kept behind
//! `SecretString` so they never leak into logs.

use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::foundation::{Timestamp, UserId};

/// Principal attached to a session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    /// Backend-issued identity.
    pub id: UserId,

    /// Email address the account was registered with.
    #[serde(default)]
    pub email: Option<String>,

    /// Free-form metadata captured at sign-up (first_name, last_name, ...).
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl AuthUser {
    /// Creates a user with no metadata.
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self {
            id,
            email,
            user_metadata: Map::new(),
        }
    }

    /// Reads a string value out of the sign-up metadata.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.get(key).and_then(Value::as_str)
    }
}

/// Session issued by the auth backend.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    /// Absolute expiry, when the backend reports one.
    pub expires_at: Option<Timestamp>,
    pub user: AuthUser,
}

impl AuthSession {
    /// Creates a session without refresh token or expiry.
    pub fn new(access_token: impl Into<String>, user: AuthUser) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            refresh_token: None,
            expires_at: None,
            user,
        }
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn with_expires_at(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Identity the session belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    /// Returns true once `now` has reached the reported expiry.
    ///
    /// Sessions without an expiry never report as expired.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.map_or(false, |exp| !now.is_before(&exp))
    }
}
