//! ProfileStore port for the `profiles` table

use async_trait::async_trait;

use super::DataError;
use crate::domain::{
    foundation::UserId,
    profile::{Profile, ProfileUpdate},
};

/// Row-level access to profiles, keyed by identity.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the single profile whose id equals `user_id`.
    ///
    /// Returns `DataError::NotFound` when no row matches.
    async fn fetch_by_id(&self, user_id: &UserId) -> Result<Profile, DataError>;

    /// Apply a partial update to the profile whose id equals `user_id`.
    async fn update_by_id(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DataError>;
}
