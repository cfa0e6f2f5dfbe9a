//! The plain-text payload encoded into the membership-card QR code.
//!
//! The payload is deliberately unstructured: scanners at the door read it
//! as multi-line text, so lines are joined with CRLF and carry the labels
//! the club has always printed on paper cards.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::Profile;

/// An academic membership season, e.g. `2025/2026`.
///
/// Seasons roll over in September: a card issued in January 2026 still
/// belongs to the 2025/2026 season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    start_year: i32,
}

impl Season {
    const ROLLOVER_MONTH: u32 = 9;

    /// Season in effect on the given date.
    pub fn on(date: NaiveDate) -> Self {
        let start_year = if date.month() >= Self::ROLLOVER_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    /// Season in effect today.
    pub fn current() -> Self {
        Self::on(chrono::Local::now().date_naive())
    }

    /// A season from its label, e.g. from a config override.
    pub fn starting(start_year: i32) -> Self {
        Self { start_year }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start_year, self.start_year + 1)
    }
}

/// Builder for the card's QR payload.
#[derive(Debug, Clone)]
pub struct CardPayload {
    club_name: String,
    season: Season,
}

impl CardPayload {
    pub fn new(club_name: impl Into<String>, season: Season) -> Self {
        Self {
            club_name: club_name.into(),
            season,
        }
    }

    /// Renders the CRLF-joined payload for one profile.
    pub fn render(&self, profile: &Profile) -> String {
        let status = if profile.is_member {
            "Adhérent validé"
        } else {
            "Non adhérent"
        };
        [
            format!("{} – Carte {}", self.club_name, self.season),
            format!("Nom : {}", profile.full_name.as_deref().unwrap_or("")),
            format!("Email : {}", profile.email.as_deref().unwrap_or("")),
            format!("Statut : {}", status),
        ]
        .join("\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::profile::Role;

    fn member_profile() -> Profile {
        Profile {
            id: UserId::new("user-2").unwrap(),
            email: Some("user2@etu.uc".to_string()),
            full_name: Some("Léo Durand".to_string()),
            role: Some(Role::User),
            is_member: true,
        }
    }

    #[test]
    fn season_rolls_over_in_september() {
        let june = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert_eq!(Season::on(june).to_string(), "2025/2026");

        let september = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        assert_eq!(Season::on(september).to_string(), "2026/2027");
    }

    #[test]
    fn payload_joins_lines_with_crlf() {
        let payload = CardPayload::new("BDE Valrose", Season::starting(2025));
        let text = payload.render(&member_profile());

        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(
            lines,
            vec![
                "BDE Valrose – Carte 2025/2026",
                "Nom : Léo Durand",
                "Email : user2@etu.uc",
                "Statut : Adhérent validé",
            ]
        );
    }

    #[test]
    fn payload_marks_non_members_and_tolerates_missing_fields() {
        let mut profile = member_profile();
        profile.is_member = false;
        profile.full_name = None;
        profile.email = None;

        let text = CardPayload::new("BDE Valrose", Season::starting(2025)).render(&profile);
        assert!(text.contains("Nom : \r\n"));
        assert!(text.ends_with("Statut : Non adhérent"));
    }
}
