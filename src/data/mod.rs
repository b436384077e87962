//! Core data models for pitwall
//!
//! This module contains the records fetched from the OpenF1 API (sessions,
//! race results and drivers) and the keys under which each query is cached.

pub mod openf1;

pub use openf1::{ApiError, OpenF1Client};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One race event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier of the session
    pub session_key: u32,
    /// Session name, e.g. "Race"
    #[serde(default)]
    pub session_name: Option<String>,
    /// Location of the event, e.g. "Monza"
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// Country hosting the event
    #[serde(default)]
    pub country_name: Option<String>,
    /// When the session started
    pub date_start: DateTime<Utc>,
}

/// A single driver's classification in one session
///
/// `position` is `None` for a non-finish. Missing or null fields are treated as
/// absent rather than as parse failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    /// Session this result belongs to
    pub session_key: u32,
    /// Car number of the driver
    pub driver_number: u32,
    /// Finishing position (1-based), absent for DNF
    #[serde(default)]
    pub position: Option<u32>,
    /// Race time in milliseconds
    #[serde(default)]
    pub time: Option<u64>,
}

/// A driver entry in the season roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Car number
    pub driver_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_name: String,
    /// Team colour as a hex string without '#', when the API provides one
    #[serde(default)]
    pub team_colour: Option<String>,
}

impl Driver {
    /// "First Last", trimmed when one of the parts is missing
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Deserializes an explicit JSON `null` into the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifies one cached query
///
/// Each variant maps to a distinct string key, so results for one session can
/// never collide with results for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// All race sessions of a season
    Sessions { year: i32 },
    /// Results of one session
    Results { session_key: u32 },
    /// Driver roster of a season
    Drivers { year: i32 },
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Sessions { year } => write!(f, "sessions-{}", year),
            CacheKey::Results { session_key } => write!(f, "results-{}", session_key),
            CacheKey::Drivers { year } => write!(f, "drivers-{}", year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_parses_openf1_record() {
        let json = r#"{
            "session_key": 9161,
            "session_name": "Race",
            "location": "Monza",
            "country_name": "Italy",
            "date_start": "2023-09-03T13:00:00+00:00",
            "circuit_short_name": "Monza"
        }"#;

        let session: Session = serde_json::from_str(json).expect("Failed to parse Session");

        assert_eq!(session.session_key, 9161);
        assert_eq!(session.location, "Monza");
        assert_eq!(session.country_name.as_deref(), Some("Italy"));
        assert_eq!(
            session.date_start,
            Utc.with_ymd_and_hms(2023, 9, 3, 13, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_race_result_with_null_position_is_dnf() {
        let json = r#"{"session_key": 1, "driver_number": 44, "position": null}"#;

        let result: RaceResult = serde_json::from_str(json).expect("Failed to parse RaceResult");

        assert_eq!(result.driver_number, 44);
        assert!(result.position.is_none());
        assert!(result.time.is_none());
    }

    #[test]
    fn test_race_result_missing_optional_fields() {
        let json = r#"{"session_key": 1, "driver_number": 1}"#;

        let result: RaceResult = serde_json::from_str(json).expect("Failed to parse RaceResult");

        assert!(result.position.is_none());
    }

    #[test]
    fn test_race_result_with_time() {
        let json = r#"{"session_key": 7, "driver_number": 1, "position": 1, "time": 5025123}"#;

        let result: RaceResult = serde_json::from_str(json).expect("Failed to parse RaceResult");

        assert_eq!(result.position, Some(1));
        assert_eq!(result.time, Some(5_025_123));
    }

    #[test]
    fn test_driver_null_names_become_empty() {
        let json = r#"{
            "driver_number": 99,
            "first_name": null,
            "last_name": "Reserve",
            "team_name": null
        }"#;

        let driver: Driver = serde_json::from_str(json).expect("Failed to parse Driver");

        assert_eq!(driver.first_name, "");
        assert_eq!(driver.team_name, "");
        assert_eq!(driver.full_name(), "Reserve");
        assert!(driver.team_colour.is_none());
    }

    #[test]
    fn test_driver_full_name() {
        let driver = Driver {
            driver_number: 1,
            first_name: "Max".to_string(),
            last_name: "Verstappen".to_string(),
            team_name: "Red Bull Racing".to_string(),
            team_colour: Some("3671C6".to_string()),
        };

        assert_eq!(driver.full_name(), "Max Verstappen");
    }

    #[test]
    fn test_cache_keys_are_distinct() {
        let keys = [
            CacheKey::Sessions { year: 2024 },
            CacheKey::Sessions { year: 2023 },
            CacheKey::Results { session_key: 42 },
            CacheKey::Results { session_key: 43 },
            CacheKey::Drivers { year: 2024 },
        ];

        for (i, key1) in keys.iter().enumerate() {
            for (j, key2) in keys.iter().enumerate() {
                if i != j {
                    assert_ne!(key1.to_string(), key2.to_string());
                }
            }
        }
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(CacheKey::Results { session_key: 42 }.to_string(), "results-42");
        assert_eq!(CacheKey::Sessions { year: 2024 }.to_string(), "sessions-2024");
        assert_eq!(CacheKey::Drivers { year: 2024 }.to_string(), "drivers-2024");
    }
}
