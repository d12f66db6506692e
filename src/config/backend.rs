//! Hosted backend configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::environment::Environment;
use super::error::ValidationError;

/// Hosted backend (auth + row-level data API) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,

    /// Public anon key sent with every request
    pub anon_key: SecretString,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: SecretString::new(anon_key.into()),
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Project URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate backend configuration
    ///
    /// In production, requires HTTPS for the project URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__URL"));
        }
        if self.anon_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__ANON_KEY"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if environment.is_production() && !self.url.starts_with("https://") {
            return Err(ValidationError::BackendUrlMustBeHttps);
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

fn default_request_timeout() -> u64 {
    10
}
