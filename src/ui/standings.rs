//! Championship tables
//!
//! Renders the drivers' and constructors' standings.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::service::Dashboard;

use super::theme::team_color;

fn rank_style(rank: usize) -> Style {
    match rank {
        1 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        2 | 3 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Gray),
    }
}

fn empty_table(frame: &mut Frame, area: Rect, title: &'static str) {
    let empty = Paragraph::new("No standings available")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(empty, area);
}

/// Renders the drivers' championship
pub fn render_drivers(frame: &mut Frame, area: Rect, dashboard: &Dashboard, scroll_offset: usize) {
    if dashboard.driver_standings.is_empty() {
        empty_table(frame, area, " Driver Standings ");
        return;
    }

    let rows: Vec<Row> = dashboard
        .driver_standings
        .iter()
        .skip(scroll_offset)
        .map(|standing| {
            let team = standing.team();
            Row::new(vec![
                Cell::from(standing.rank.to_string()).style(rank_style(standing.rank)),
                Cell::from(standing.full_name().to_string()),
                Cell::from(team.to_string()).style(Style::default().fg(team_color(&team))),
                Cell::from(standing.points.to_string()),
                Cell::from(standing.wins.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(20),
            Constraint::Min(18),
            Constraint::Length(6),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new(["Pos", "Driver", "Team", "Pts", "Wins"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Driver Standings "),
    );

    frame.render_widget(table, area);
}

/// Renders the constructors' championship
pub fn render_constructors(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    scroll_offset: usize,
) {
    if dashboard.constructor_standings.is_empty() {
        empty_table(frame, area, " Constructor Standings ");
        return;
    }

    let rows: Vec<Row> = dashboard
        .constructor_standings
        .iter()
        .skip(scroll_offset)
        .map(|standing| {
            let team = Line::from(vec![
                Span::styled("■ ", Style::default().fg(team_color(&standing.team))),
                Span::raw(standing.team.to_string()),
            ]);
            Row::new(vec![
                Cell::from(standing.rank.to_string()).style(rank_style(standing.rank)),
                Cell::from(team),
                Cell::from(standing.points.to_string()),
                Cell::from(standing.wins.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(24),
            Constraint::Length(6),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new(["Pos", "Team", "Pts", "Wins"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Constructor Standings "),
    );

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_dashboard;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(draw: impl FnOnce(&mut Frame)) -> String {
        let backend = TestBackend::new(80, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(draw).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_driver_table_lists_standings() {
        let dashboard = sample_dashboard();
        let content = rendered(|frame| {
            let area = frame.area();
            render_drivers(frame, area, &dashboard, 0)
        });
        assert!(content.contains("Driver Standings"));
        assert!(content.contains("Max Verstappen"));
        assert!(content.contains("Sergio Perez"));
        assert!(content.contains("Wins"));
    }

    #[test]
    fn test_constructor_table_lists_teams() {
        let dashboard = sample_dashboard();
        let content = rendered(|frame| {
            let area = frame.area();
            render_constructors(frame, area, &dashboard, 0)
        });
        assert!(content.contains("Constructor Standings"));
        assert!(content.contains("Red Bull Racing"));
        assert!(content.contains("Ferrari"));
    }

    #[test]
    fn test_empty_standings_placeholder() {
        let mut dashboard = sample_dashboard();
        dashboard.driver_standings.clear();
        dashboard.constructor_standings.clear();

        let drivers = rendered(|frame| {
            let area = frame.area();
            render_drivers(frame, area, &dashboard, 0)
        });
        let constructors = rendered(|frame| {
            let area = frame.area();
            render_constructors(frame, area, &dashboard, 0)
        });

        assert!(drivers.contains("No standings available"));
        assert!(constructors.contains("No standings available"));
    }
}
