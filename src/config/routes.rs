//! Route guard configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Where the route guard sends visitors
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RoutesConfig {
    /// Target for anonymous visitors of protected routes
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Target for signed-in visitors of guest-only routes
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
}

impl RoutesConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.login_path.starts_with('/') {
            return Err(ValidationError::InvalidRoutePath("ROUTES__LOGIN_PATH"));
        }
        if !self.landing_path.starts_with('/') {
            return Err(ValidationError::InvalidRoutePath("ROUTES__LANDING_PATH"));
        }
        Ok(())
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            landing_path: default_landing_path(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_landing_path() -> String {
    "/dashboard".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_defaults() {
        let config = RoutesConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.landing_path, "/dashboard");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_paths_rejected() {
        let config = RoutesConfig {
            login_path: "login".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidRoutePath("ROUTES__LOGIN_PATH"))
        );

        let config = RoutesConfig {
            landing_path: "dashboard".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
