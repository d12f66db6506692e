//! Requests handed to the auth backend.
//!
//! `SignUpRequest` and `SignInRequest` are what page collaborators pass to
//! the session manager; `SignUpPayload` and `PasswordCredentials` are what
//! actually reaches the backend.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Account creation input.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub mobile_number: String,
}

impl SignUpRequest {
    /// Builds the backend payload: credentials plus profile metadata
    /// under snake_case keys.
    pub fn to_payload(&self) -> SignUpPayload {
        SignUpPayload {
            email: self.email.clone(),
            password: self.password.clone(),
            options: SignUpOptions {
                data: SignUpMetadata {
                    first_name: self.first_name.clone(),
                    last_name: self.last_name.clone(),
                    date_of_birth: self.date_of_birth,
                    mobile_number: self.mobile_number.clone(),
                },
            },
        }
    }
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("mobile_number", &self.mobile_number)
            .finish()
    }
}

/// Account creation call as forwarded to the backend.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignUpPayload {
    pub email: String,
    pub password: String,
    pub options: SignUpOptions,
}

impl fmt::Debug for SignUpPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpPayload")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("options", &self.options)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpOptions {
    pub data: SignUpMetadata,
}

/// Profile fields the backend copies into the new `profiles` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpMetadata {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub mobile_number: String,
}

/// Password sign-in input.
///
/// `ip_address` and `user_agent` only feed the session log; they are never
/// part of the sign-in call.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl SignInRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ip_address: None,
            user_agent: None,
        }
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The exact `{ email, password }` pair sent to the backend.
    pub fn credentials(&self) -> PasswordCredentials {
        PasswordCredentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("ip_address", &self.ip_address)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Email/password pair for the backend's password grant.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
