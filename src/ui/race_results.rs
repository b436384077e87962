//! Current race screen rendering
//!
//! Shows the classification of the most recent race: position, driver, team,
//! race time and points scored.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::service::{ClassifiedResult, Dashboard, MAX_RESULT_ROWS};

use super::theme::{format_position, format_race_date, format_race_time, team_color};

/// Renders the current race classification
pub fn render(frame: &mut Frame, area: Rect, dashboard: &Dashboard, scroll_offset: usize) {
    let Some(race) = &dashboard.current_race else {
        let empty = Paragraph::new("No current race data available")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Current Race "));
        frame.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            format!("{} Grand Prix", race.session.location),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format_race_date(&race.session.date_start.with_timezone(&Local)),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let rows: Vec<Row> = race
        .results
        .iter()
        .take(MAX_RESULT_ROWS)
        .skip(scroll_offset)
        .map(result_row)
        .collect();

    let header = Row::new(["Pos", "Driver", "Team", "Time", "Pts"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(20),
            Constraint::Min(18),
            Constraint::Length(12),
            Constraint::Length(4),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Race Results "));

    frame.render_widget(table, chunks[1]);
}

fn result_row(classified: &ClassifiedResult) -> Row<'static> {
    let team = classified.attribution.team();
    let position_style = match classified.result.position {
        Some(1) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Some(_) => Style::default().fg(Color::White),
        None => Style::default().fg(Color::Red),
    };

    Row::new(vec![
        Cell::from(format_position(classified.result.position)).style(position_style),
        Cell::from(classified.attribution.full_name().to_string()),
        Cell::from(team.to_string()).style(Style::default().fg(team_color(&team))),
        Cell::from(format_race_time(classified.result.time)),
        Cell::from(classified.points.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_dashboard;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(dashboard: &Dashboard, scroll_offset: usize) -> String {
        let backend = TestBackend::new(90, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, dashboard, scroll_offset)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_race_title_and_rows() {
        let content = rendered(&sample_dashboard(), 0);
        assert!(content.contains("Monza Grand Prix"));
        assert!(content.contains("Max Verstappen"));
        assert!(content.contains("Ferrari"));
        assert!(content.contains("DNF"));
        assert!(content.contains("80:00.000"));
    }

    #[test]
    fn test_scroll_hides_leading_rows() {
        let content = rendered(&sample_dashboard(), 2);
        assert!(!content.contains("Max Verstappen"));
        assert!(content.contains("Carlos Sainz"));
    }

    #[test]
    fn test_renders_placeholder_without_race() {
        let mut dashboard = sample_dashboard();
        dashboard.current_race = None;
        let content = rendered(&dashboard, 0);
        assert!(content.contains("No current race data available"));
    }
}
