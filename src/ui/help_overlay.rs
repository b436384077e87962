//! Keybinding reference drawn over the dashboard

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the key column
const KEY_WIDTH: usize = 14;

const OVERLAY_WIDTH: u16 = 50;

/// Keybindings grouped by what they act on
const KEYMAP: &[(&str, &[(&str, &str)])] = &[
    (
        "Tabs",
        &[
            ("Tab, →", "Next tab"),
            ("Shift-Tab, ←", "Previous tab"),
            ("1 / 2 / 3", "Race / Drivers / Constructors"),
        ],
    ),
    (
        "Tables",
        &[("↑/k, ↓/j", "Scroll up/down"), ("g, G", "Jump to top/bottom")],
    ),
    (
        "Other",
        &[
            ("r", "Refresh data"),
            ("?", "Toggle this help"),
            ("q, Esc", "Quit"),
        ],
    ),
];

/// Draws the keymap in a bordered box centered on the frame
pub fn render(frame: &mut Frame) {
    let lines = keymap_lines();
    // Two rows of border
    let height = lines.len() as u16 + 2;
    let area = centered(frame.area(), OVERLAY_WIDTH, height);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

fn keymap_lines() -> Vec<Line<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::styled(
        "Keyboard Shortcuts",
        heading.fg(Color::Cyan),
    )];

    for (section, bindings) in KEYMAP {
        lines.push(Line::default());
        lines.push(Line::styled(*section, heading));
        lines.extend(bindings.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<KEY_WIDTH$}"),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(*action),
            ])
        }));
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

/// A `width` x `height` rect in the middle of `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
