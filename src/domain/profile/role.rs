//! UserRole enum governing which dashboard a profile sees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Role tag stored on every profile (`user_role` enum in the backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    PetOwner,
    ServiceProvider,
    Admin,
}

impl UserRole {
    /// Wire value (`pet_owner`, `service_provider`, `admin`).
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::PetOwner => "pet_owner",
            UserRole::ServiceProvider => "service_provider",
            UserRole::Admin => "admin",
        }
    }

    /// Human label shown under the user's name.
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::PetOwner => "Pet owner",
            UserRole::ServiceProvider => "Service provider",
            UserRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pet_owner" => Ok(UserRole::PetOwner),
            "service_provider" => Ok(UserRole::ServiceProvider),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pet_owner() {
        assert_eq!(UserRole::default(), UserRole::PetOwner);
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::ServiceProvider).unwrap(),
            "\"service_provider\""
        );
        let role: UserRole = serde_json::from_str("\"pet_owner\"").unwrap();
        assert_eq!(role, UserRole::PetOwner);
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(UserRole::PetOwner.label(), "Pet owner");
        assert_eq!(UserRole::ServiceProvider.label(), "Service provider");
    }
}
