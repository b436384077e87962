//! Shared formatting helpers for the dashboard
//!
//! Team colours, race time and race date formatting used by every screen and by
//! the plain text report.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use ratatui::style::Color;

use crate::standings::Team;

/// Colour used for teams without a known livery
pub const FALLBACK_TEAM_COLOR: Color = Color::Rgb(0x66, 0x66, 0x66);

/// Livery colour for a team
pub fn team_color(team: &Team) -> Color {
    let Some(name) = team.name() else {
        return FALLBACK_TEAM_COLOR;
    };
    match name {
        "Red Bull Racing" => Color::Rgb(0x1E, 0x41, 0xFF),
        "Mercedes" => Color::Rgb(0x00, 0xD2, 0xBE),
        "Ferrari" => Color::Rgb(0xDC, 0x00, 0x00),
        "McLaren" => Color::Rgb(0xFF, 0x87, 0x00),
        "Aston Martin" => Color::Rgb(0x00, 0x6F, 0x62),
        "Alpine" => Color::Rgb(0x00, 0x90, 0xFF),
        "Williams" => Color::Rgb(0x00, 0x5A, 0xFF),
        "AlphaTauri" => Color::Rgb(0x2B, 0x45, 0x62),
        "Alfa Romeo" => Color::Rgb(0x90, 0x00, 0x00),
        "Haas" => Color::Rgb(0xFF, 0xFF, 0xFF),
        _ => FALLBACK_TEAM_COLOR,
    }
}

/// Formats a race time given in milliseconds
///
/// Examples: `None` -> "N/A", 5123 -> "5.123s", 65123 -> "1:05.123"
pub fn format_race_time(millis: Option<u64>) -> String {
    let millis = match millis {
        Some(ms) if ms > 0 => ms,
        _ => return "N/A".to_string(),
    };

    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let fraction = millis % 1000;

    if minutes > 0 {
        format!("{}:{:02}.{:03}", minutes, seconds, fraction)
    } else {
        format!("{}.{:03}s", seconds, fraction)
    }
}

/// Formats a race date as e.g. "September 3, 2023"
pub fn format_race_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Position cell text, "DNF" for non-finishers
pub fn format_position(position: Option<u32>) -> String {
    position.map_or_else(|| "DNF".to_string(), |p| p.to_string())
}
