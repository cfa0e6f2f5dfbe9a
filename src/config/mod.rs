//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values carry the `CLUBCARD` prefix with
//! `__` separating nested sections.
//!
//! No section is mandatory: with nothing set, the application runs against
//! the in-memory stand-in client. The host inspects [`AppConfig::backend`]
//! and injects the matching adapter at construction time; nothing in the
//! library reads ambient global state.

mod backend;
mod card;
mod error;

pub use backend::BackendConfig;
pub use card::CardConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Real backend (PostgREST endpoint); absent means in-memory stand-in.
    #[serde(default)]
    pub backend: Option<BackendConfig>,

    /// Card rendering (club name, season override).
    #[serde(default)]
    pub card: CardConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variable Format
    ///
    /// - `CLUBCARD__BACKEND__URL=https://xyz.supabase.co`
    /// - `CLUBCARD__BACKEND__API_KEY=...`
    /// - `CLUBCARD__CARD__CLUB_NAME=BDE Valrose`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLUBCARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(backend) = &self.backend {
            backend.validate()?;
        }
        self.card.validate()?;
        Ok(())
    }
}
