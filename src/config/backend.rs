//! Backend (PostgREST) configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

fn default_table() -> String {
    "profiles".to_string()
}

/// Connection settings for the real profile backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// API key sent as `apikey` and bearer token. Never logged.
    pub api_key: Secret<String>,

    /// Profile table name.
    #[serde(default = "default_table")]
    pub table: String,
}

impl BackendConfig {
    /// Validate backend configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__API_KEY"));
        }
        if self.table.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__TABLE"));
        }
        Ok(())
    }
}
