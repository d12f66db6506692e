//! Application profile record (`profiles` table).
//!
//! The backend creates the row at sign-up time from the metadata sent with
//! the account-creation call. This client only reads it and applies
//! partial updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserRole;
use crate::domain::foundation::{Timestamp, UserId};

/// A `profiles` row, keyed by the owning identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub mobile_number: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Profile {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Upper-cased first letters of first and last name, as used by the avatar.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Pet owners are offered the "Become a Service Provider" flow.
    pub fn can_become_provider(&self) -> bool {
        self.role == UserRole::PetOwner
    }
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn date_of_birth(mut self, value: NaiveDate) -> Self {
        self.date_of_birth = Some(value);
        self
    }

    pub fn mobile_number(mut self, value: impl Into<String>) -> Self {
        self.mobile_number = Some(value.into());
        self
    }

    pub fn role(mut self, value: UserRole) -> Self {
        self.role = Some(value);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the set fields onto a profile.
    ///
    /// Used by in-memory stores; the hosted backend does the equivalent.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(v) = &self.first_name {
            profile.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            profile.last_name = v.clone();
        }
        if let Some(v) = self.date_of_birth {
            profile.date_of_birth = v;
        }
        if let Some(v) = &self.mobile_number {
            profile.mobile_number = v.clone();
        }
        if let Some(v) = self.role {
            profile.role = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jane() -> Profile {
        Profile {
            id: UserId::new("u1").unwrap(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            mobile_number: "+1234567890".into(),
            role: UserRole::PetOwner,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn deserializes_backend_row() {
        let row = json!({
            "id": "u1",
            "first_name": "Jane",
            "last_name": "Doe",
            "date_of_birth": "1990-01-01",
            "mobile_number": "+1234567890",
            "role": "service_provider",
            "created_at": "2024-03-01T12:00:00+00:00",
            "updated_at": null
        });

        let profile: Profile = serde_json::from_value(row).unwrap();

        assert_eq!(profile.id.as_str(), "u1");
        assert_eq!(profile.role, UserRole::ServiceProvider);
        assert!(profile.created_at.is_some());
        assert!(profile.updated_at.is_none());
    }

    #[test]
    fn presentation_helpers() {
        let profile = jane();
        assert_eq!(profile.full_name(), "Jane Doe");
        assert_eq!(profile.initials(), "JD");
        assert!(profile.can_become_provider());

        let provider = Profile {
            role: UserRole::ServiceProvider,
            ..jane()
        };
        assert!(!provider.can_become_provider());
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = ProfileUpdate::new().first_name("Janet");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "first_name": "Janet" })
        );
        assert!(!update.is_empty());
        assert!(ProfileUpdate::new().is_empty());
    }

    #[test]
    fn update_applies_set_fields_only() {
        let mut profile = jane();
        ProfileUpdate::new()
            .mobile_number("+4400000000")
            .role(UserRole::Admin)
            .apply_to(&mut profile);

        assert_eq!(profile.first_name, "Jane");
        assert_eq!(profile.mobile_number, "+4400000000");
        assert_eq!(profile.role, UserRole::Admin);
    }
}
