//! Dashboard screen rendering
//!
//! Lays out the header with tabs, the table of the selected tab and the status
//! line showing data freshness.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Tab};
use crate::service::Dashboard;

use super::{help_overlay, race_results, standings};

/// Renders the dashboard for the selected tab
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and tabs
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    match &app.dashboard {
        Some(dashboard) => match app.tab {
            Tab::CurrentRace => {
                race_results::render(frame, chunks[1], dashboard, app.scroll_offset)
            }
            Tab::Drivers => {
                standings::render_drivers(frame, chunks[1], dashboard, app.scroll_offset)
            }
            Tab::Constructors => {
                standings::render_constructors(frame, chunks[1], dashboard, app.scroll_offset)
            }
        },
        None => {
            let waiting = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(waiting, chunks[1]);
        }
    }

    render_status(frame, app, chunks[2]);

    if app.show_help {
        help_overlay::render(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .title(Span::styled(
                    " PITWALL ",
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    if let Some(dashboard) = &app.dashboard {
        spans.push(Span::styled(
            format!("Last updated: {}", dashboard.refreshed_at.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
        if is_degraded(dashboard, app.tab) {
            spans.push(Span::styled(
                "  stale data",
                Style::default().fg(Color::Yellow),
            ));
        }
    }
    if app.refreshing {
        spans.push(Span::styled(
            "  refreshing...",
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(
        "  Tab: switch  r: refresh  ?: help  q: quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Whether the data behind `tab` came from a failed refresh
pub fn is_degraded(dashboard: &Dashboard, tab: Tab) -> bool {
    match tab {
        Tab::CurrentRace => dashboard.current_race_degraded,
        Tab::Drivers | Tab::Constructors => dashboard.standings_degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_dashboard;
    use crate::refresh::RefreshMessage;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.apply_refresh(RefreshMessage::Updated(Box::new(sample_dashboard())));
        app
    }

    #[test]
    fn test_renders_tabs_and_status() {
        let content = rendered(&loaded_app());
        assert!(content.contains("PITWALL"));
        assert!(content.contains("Current Race"));
        assert!(content.contains("Constructors"));
        assert!(content.contains("Last updated"));
    }

    #[test]
    fn test_renders_selected_tab_table() {
        let mut app = loaded_app();
        app.tab = Tab::Constructors;
        let content = rendered(&app);
        assert!(content.contains("Red Bull Racing"));
        assert!(content.contains("43"));
    }

    #[test]
    fn test_stale_marker_follows_tab() {
        let mut dashboard = sample_dashboard();
        dashboard.standings_degraded = true;
        let mut app = App::new();
        app.apply_refresh(RefreshMessage::Updated(Box::new(dashboard)));

        assert!(!rendered(&app).contains("stale data"));
        app.tab = Tab::Drivers;
        assert!(rendered(&app).contains("stale data"));
    }

    #[test]
    fn test_waiting_without_dashboard() {
        let content = rendered(&App::new());
        assert!(content.contains("Waiting for data"));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let mut app = loaded_app();
        app.show_help = true;
        let content = rendered(&app);
        assert!(content.contains("Keyboard Shortcuts"));
    }
}
