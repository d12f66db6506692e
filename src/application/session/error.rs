//! Errors returned by session manager operations.

use thiserror::Error;

use crate::ports::DataError;

/// Failure of `SessionManager::update_profile`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileUpdateError {
    /// Called while nobody is signed in; no backend call was made.
    #[error("No user logged in")]
    NoUserLoggedIn,

    /// The backend rejected the update.
    #[error(transparent)]
    Data(#[from] DataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_user_message_is_exact() {
        assert_eq!(ProfileUpdateError::NoUserLoggedIn.to_string(), "No user logged in");
    }

    #[test]
    fn data_errors_display_backend_message() {
        let err: ProfileUpdateError = DataError::api("permission denied").into();
        assert_eq!(err.to_string(), "permission denied");
    }
}
