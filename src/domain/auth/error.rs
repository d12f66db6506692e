//! Errors reported by the auth backend.
//!
//! Backend-reported errors are surfaced verbatim to UI collaborators, so
//! `AuthError::Api` carries the backend message untouched and compares by
//! value.

use thiserror::Error;

/// Message the backend returns for a bad email/password pair.
const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Authentication errors returned from sign-up, sign-in and sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Error reported by the auth backend (bad credentials, duplicate email, ...).
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        code: Option<String>,
    },

    /// The auth backend could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The auth backend answered with something we could not decode.
    #[error("Unexpected auth response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    /// Creates a backend-reported error carrying only a message.
    pub fn api(message: impl Into<String>) -> Self {
        AuthError::Api {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Attaches an HTTP status to a backend-reported error.
    pub fn with_status(self, status: u16) -> Self {
        match self {
            AuthError::Api { message, code, .. } => AuthError::Api {
                message,
                status: Some(status),
                code,
            },
            other => other,
        }
    }

    /// Attaches a backend error code to a backend-reported error.
    pub fn with_code(self, code: impl Into<String>) -> Self {
        match self {
            AuthError::Api {
                message, status, ..
            } => AuthError::Api {
                message,
                status,
                code: Some(code.into()),
            },
            other => other,
        }
    }

    /// Text suitable for rendering next to a sign-in or sign-up form.
    pub fn display_message(&self) -> String {
        match self {
            AuthError::Api { message, .. } if message == INVALID_CREDENTIALS => {
                "Invalid email or password. Please try again.".to_string()
            }
            AuthError::Api { message, .. } => message.clone(),
            AuthError::ServiceUnavailable(_) | AuthError::InvalidResponse(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
        }
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
