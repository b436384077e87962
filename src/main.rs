//! Pitwall - Formula 1 results and standings in the terminal
//!
//! A terminal UI application that displays the latest race classification and
//! the drivers' and constructors' championships, refreshed periodically.

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use pitwall::app::{App, AppState};
use pitwall::cache::ResponseCache;
use pitwall::cli::{Cli, StartupConfig};
use pitwall::data::OpenF1Client;
use pitwall::refresh::{try_recv, RefreshHandle};
use pitwall::report::render_report;
use pitwall::service::PaddockService;
use pitwall::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.state {
        AppState::Loading => {
            render_loading(frame);
            if app.show_help {
                ui::render_help_overlay(frame);
            }
        }
        AppState::Dashboard => {
            ui::render_dashboard(frame, app);
        }
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading race data...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let client = OpenF1Client::new(config.base_url.clone(), config.request_timeout)?;
    let service = Arc::new(PaddockService::new(
        Arc::new(ResponseCache::new()),
        client,
        config.service.clone(),
    ));

    if config.once {
        logging::init_stderr();
        let dashboard = service.snapshot().await;
        print!("{}", render_report(&dashboard));
        return Ok(());
    }

    logging::init_file(&config.log_file)?;
    info!(
        year = config.service.year,
        base_url = %config.base_url,
        "starting dashboard"
    );

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut refresh = RefreshHandle::spawn(service, config.refresh.clone());
    let mut app = App::new();

    // Main event loop
    loop {
        while let Some(message) = try_recv(&mut refresh) {
            app.apply_refresh(message);
        }

        if app.refresh_requested {
            refresh.request_refresh();
            app.refresh_requested = false;
        }

        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    refresh.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
