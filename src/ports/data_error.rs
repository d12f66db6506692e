//! Errors reported by the backend's row-level data API.

use thiserror::Error;

/// Failure of a read, insert or update against a backend table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A single-row read matched no row.
    #[error("Row not found")]
    NotFound,

    /// The backend rejected the request (RLS denial, constraint, bad filter...).
    #[error("{message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    /// The backend could not be reached.
    #[error("Data service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The backend answered with a body we could not decode.
    #[error("Unexpected data response: {0}")]
    InvalidResponse(String),
}

impl DataError {
    /// Creates a backend-reported error carrying only a message.
    pub fn api(message: impl Into<String>) -> Self {
        DataError::Api {
            message: message.into(),
            code: None,
            status: None,
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        DataError::ServiceUnavailable(message.into())
    }
}
