//! In-memory profile store for testing.
//!
//! Behaves like the hosted `profiles` table as seen through the row-level
//! API: a read of a missing row is `NotFound`, an update that matches no
//! row succeeds without effect.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::adapters::lock;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::ports::{DataError, ProfileStore};

/// In-memory `ProfileStore`.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
    /// Optional error to return for every call (for error testing)
    force_error: RwLock<Option<DataError>>,
    fetch_calls: AtomicUsize,
    update_calls: RwLock<Vec<(UserId, ProfileUpdate)>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a profile row.
    pub fn with_profile(self, profile: Profile) -> Self {
        self.insert(profile);
        self
    }

    /// Forces all calls to fail with `error`.
    pub fn with_error(self, error: DataError) -> Self {
        self.set_error(error);
        self
    }

    pub fn set_error(&self, error: DataError) {
        *lock::write(&self.force_error) = Some(error);
    }

    pub fn clear_error(&self) {
        *lock::write(&self.force_error) = None;
    }

    /// Inserts or replaces a row at runtime.
    pub fn insert(&self, profile: Profile) {
        lock::write(&self.profiles).insert(profile.id.clone(), profile);
    }

    // === Test Helpers ===

    /// Row as currently stored.
    pub fn get(&self, user_id: &UserId) -> Option<Profile> {
        lock::read(&self.profiles).get(user_id).cloned()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> Vec<(UserId, ProfileUpdate)> {
        lock::read(&self.update_calls).clone()
    }

    fn forced_error(&self) -> Option<DataError> {
        lock::read(&self.force_error).clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch_by_id(&self, user_id: &UserId) -> Result<Profile, DataError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        self.get(user_id).ok_or(DataError::NotFound)
    }

    async fn update_by_id(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), DataError> {
        lock::write(&self.update_calls).push((user_id.clone(), update.clone()));

        if let Some(error) = self.forced_error() {
            return Err(error);
        }

        if let Some(profile) = lock::write(&self.profiles).get_mut(user_id) {
            update.apply_to(profile);
            profile.updated_at = Some(Timestamp::now());
        }
        Ok(())
    }
}
