//! Pitwall Library
//!
//! Formula 1 race results and championship standings. The response cache and the
//! standings engine are the core; the rest fetches, schedules and displays.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod refresh;
pub mod report;
pub mod service;
pub mod standings;
pub mod ui;
