//! UI rendering module for pitwall
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod dashboard;
pub mod help_overlay;
pub mod race_results;
pub mod standings;
pub mod theme;

pub use dashboard::render as render_dashboard;
pub use help_overlay::render as render_help_overlay;
