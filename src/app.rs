//! Application state management for pitwall
//!
//! This module contains the main application state, handling keyboard input,
//! incoming refresh snapshots, and tab/scroll state of the dashboard.

use crossterm::event::{KeyCode, KeyEvent};

use crate::refresh::RefreshMessage;
use crate::service::{Dashboard, MAX_RESULT_ROWS};

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the first snapshot
    Loading,
    /// Showing the dashboard
    Dashboard,
}

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    CurrentRace,
    Drivers,
    Constructors,
}

impl Tab {
    /// All tabs in display order
    pub const ALL: [Tab; 3] = [Tab::CurrentRace, Tab::Drivers, Tab::Constructors];

    pub fn title(self) -> &'static str {
        match self {
            Tab::CurrentRace => "Current Race",
            Tab::Drivers => "Drivers",
            Tab::Constructors => "Constructors",
        }
    }

    /// Position in [`Tab::ALL`]
    pub fn index(self) -> usize {
        match self {
            Tab::CurrentRace => 0,
            Tab::Drivers => 1,
            Tab::Constructors => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Selected dashboard tab
    pub tab: Tab,
    /// Latest snapshot, if any has arrived
    pub dashboard: Option<Dashboard>,
    /// A refresh is in progress
    pub refreshing: bool,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// First visible row of the current tab's table
    pub scroll_offset: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new App instance in the loading state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            tab: Tab::CurrentRace,
            dashboard: None,
            refreshing: false,
            refresh_requested: false,
            should_quit: false,
            show_help: false,
            scroll_offset: 0,
        }
    }

    /// Applies a message from the background refresh task
    pub fn apply_refresh(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::RefreshStarted => {
                self.refreshing = true;
            }
            RefreshMessage::Updated(dashboard) => {
                self.dashboard = Some(*dashboard);
                self.refreshing = false;
                self.state = AppState::Dashboard;
                self.clamp_scroll();
            }
        }
    }

    /// Number of table rows on the selected tab
    pub fn row_count(&self) -> usize {
        let Some(dashboard) = &self.dashboard else {
            return 0;
        };
        match self.tab {
            Tab::CurrentRace => dashboard
                .current_race
                .as_ref()
                .map_or(0, |race| race.results.len().min(MAX_RESULT_ROWS)),
            Tab::Drivers => dashboard.driver_standings.len(),
            Tab::Constructors => dashboard.constructor_standings.len(),
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Esc`: Close help, otherwise quit
    /// - `Tab`/`Right`, `BackTab`/`Left`: Cycle tabs
    /// - `1`-`3`: Jump to a tab
    /// - `Up`/`k`, `Down`/`j`: Scroll
    /// - `g`/`Home`, `G`/`End`: Scroll to top/bottom
    /// - `r`: Refresh now
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            KeyCode::Char('r') => {
                self.refresh_requested = true;
                return;
            }
            _ => {}
        }

        if self.state == AppState::Loading {
            return;
        }

        match key_event.code {
            KeyCode::Tab | KeyCode::Right => self.select_tab(self.tab.next()),
            KeyCode::BackTab | KeyCode::Left => self.select_tab(self.tab.previous()),
            KeyCode::Char('1') => self.select_tab(Tab::CurrentRace),
            KeyCode::Char('2') => self.select_tab(Tab::Drivers),
            KeyCode::Char('3') => self.select_tab(Tab::Constructors),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_offset = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll_offset = self.row_count().saturating_sub(1);
            }
            _ => {}
        }
    }

    fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.scroll_offset = 0;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.row_count() {
            self.scroll_offset += 1;
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self
            .scroll_offset
            .min(self.row_count().saturating_sub(1));
    }
}
