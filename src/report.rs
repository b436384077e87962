//! Plain text report for `--once`
//!
//! Formats a dashboard snapshot as three aligned text tables.

use std::fmt::Write;

use chrono::Local;

use crate::service::{Dashboard, MAX_RESULT_ROWS};
use crate::ui::theme::{format_position, format_race_date, format_race_time};

/// Renders the current race, driver standings and constructor standings
pub fn render_report(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    write_report(&mut out, dashboard).expect("writing to a String is infallible");
    out
}

fn write_report(out: &mut String, dashboard: &Dashboard) -> std::fmt::Result {
    write_current_race(out, dashboard)?;
    writeln!(out)?;
    write_driver_standings(out, dashboard)?;
    writeln!(out)?;
    write_constructor_standings(out, dashboard)
}

fn stale_suffix(degraded: bool) -> &'static str {
    if degraded {
        " (stale)"
    } else {
        ""
    }
}

fn write_current_race(out: &mut String, dashboard: &Dashboard) -> std::fmt::Result {
    let Some(race) = &dashboard.current_race else {
        writeln!(out, "CURRENT RACE{}", stale_suffix(dashboard.current_race_degraded))?;
        return writeln!(out, "No current race data available");
    };

    writeln!(
        out,
        "{} GRAND PRIX - {}{}",
        race.session.location.to_uppercase(),
        format_race_date(&race.session.date_start.with_timezone(&Local)),
        stale_suffix(dashboard.current_race_degraded)
    )?;
    writeln!(
        out,
        "{:<4} {:<24} {:<20} {:>12} {:>4}",
        "Pos", "Driver", "Team", "Time", "Pts"
    )?;
    for classified in race.results.iter().take(MAX_RESULT_ROWS) {
        writeln!(
            out,
            "{:<4} {:<24} {:<20} {:>12} {:>4}",
            format_position(classified.result.position),
            classified.attribution.full_name(),
            classified.attribution.team().to_string(),
            format_race_time(classified.result.time),
            classified.points
        )?;
    }
    Ok(())
}

fn write_driver_standings(out: &mut String, dashboard: &Dashboard) -> std::fmt::Result {
    writeln!(out, "DRIVER STANDINGS{}", stale_suffix(dashboard.standings_degraded))?;
    writeln!(
        out,
        "{:<4} {:<24} {:<20} {:>5} {:>4}",
        "Pos", "Driver", "Team", "Pts", "Wins"
    )?;
    for standing in &dashboard.driver_standings {
        writeln!(
            out,
            "{:<4} {:<24} {:<20} {:>5} {:>4}",
            standing.rank,
            standing.full_name(),
            standing.team().to_string(),
            standing.points,
            standing.wins
        )?;
    }
    Ok(())
}

fn write_constructor_standings(out: &mut String, dashboard: &Dashboard) -> std::fmt::Result {
    writeln!(
        out,
        "CONSTRUCTOR STANDINGS{}",
        stale_suffix(dashboard.standings_degraded)
    )?;
    writeln!(out, "{:<4} {:<24} {:>5} {:>4}", "Pos", "Team", "Pts", "Wins")?;
    for standing in &dashboard.constructor_standings {
        writeln!(
            out,
            "{:<4} {:<24} {:>5} {:>4}",
            standing.rank,
            standing.team.to_string(),
            standing.points,
            standing.wins
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_dashboard;

    #[test]
    fn test_report_contains_all_sections() {
        let report = render_report(&sample_dashboard());
        assert!(report.contains("MONZA GRAND PRIX"));
        assert!(report.contains("DRIVER STANDINGS"));
        assert!(report.contains("CONSTRUCTOR STANDINGS"));
        assert!(!report.contains("(stale)"));
    }

    #[test]
    fn test_report_sections_in_order_with_blank_separators() {
        let report = render_report(&sample_dashboard());
        let race = report.find("MONZA GRAND PRIX").expect("race section");
        let drivers = report.find("\n\nDRIVER STANDINGS\n").expect("drivers section");
        let constructors = report
            .find("\n\nCONSTRUCTOR STANDINGS\n")
            .expect("constructors section");
        assert!(race < drivers && drivers < constructors);
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_report_rows() {
        let report = render_report(&sample_dashboard());
        let verstappen = report
            .lines()
            .find(|line| line.starts_with("1 ") && line.contains("Max Verstappen"))
            .expect("Should list the leader");
        assert!(verstappen.contains("Red Bull Racing"));
        assert!(report.contains("DNF"));
        assert!(report
            .lines()
            .any(|line| line.contains("Red Bull Racing") && line.contains("43")));
    }

    #[test]
    fn test_report_marks_stale_sections() {
        let mut dashboard = sample_dashboard();
        dashboard.current_race = None;
        dashboard.current_race_degraded = true;
        dashboard.standings_degraded = true;
        dashboard.driver_standings.clear();
        dashboard.constructor_standings.clear();

        let report = render_report(&dashboard);

        assert!(report.contains("CURRENT RACE (stale)"));
        assert!(report.contains("No current race data available"));
        assert!(report.contains("DRIVER STANDINGS (stale)"));
    }
}
