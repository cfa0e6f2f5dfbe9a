//! Card rendering configuration

use serde::Deserialize;

use crate::domain::profile::Season;

use super::error::ValidationError;

fn default_club_name() -> String {
    "BDE Valrose".to_string()
}

/// Settings for the card payload (club identity, season).
#[derive(Debug, Clone, Deserialize)]
pub struct CardConfig {
    /// Club name printed on the card title line.
    #[serde(default = "default_club_name")]
    pub club_name: String,

    /// Season override (start year). Absent means "season in effect today".
    #[serde(default)]
    pub season_start_year: Option<i32>,
}

impl CardConfig {
    /// The season cards are issued for.
    pub fn season(&self) -> Season {
        match self.season_start_year {
            Some(year) => Season::starting(year),
            None => Season::current(),
        }
    }

    /// Validate card configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.club_name.trim().is_empty() {
            return Err(ValidationError::EmptyClubName);
        }
        if let Some(year) = self.season_start_year {
            if !(2000..=2100).contains(&year) {
                return Err(ValidationError::InvalidSeasonYear);
            }
        }
        Ok(())
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            club_name: default_club_name(),
            season_start_year: None,
        }
    }
}
