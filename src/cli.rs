//! Command-line interface parsing for pitwall
//!
//! This module handles parsing of CLI arguments using clap and validates them
//! into the configuration the service, refresh task and logging are built from.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Local};
use clap::Parser;
use thiserror::Error;

use crate::data::openf1::OPENF1_BASE_URL;
use crate::refresh::RefreshConfig;
use crate::service::ServiceConfig;

/// Earliest season accepted by `--year`
const MIN_YEAR: i32 = 1950;

/// Latest season accepted by `--year`
const MAX_YEAR: i32 = 2100;

/// Longest duration accepted by the `--*-secs` flags (one day)
const MAX_DURATION_SECS: u64 = 86_400;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The season is outside the supported range
    #[error("Invalid year: {0}. Expected a season between 1950 and 2100")]
    InvalidYear(i32),

    /// A duration argument was zero
    #[error("Invalid value for --{0}: must be greater than zero")]
    ZeroDuration(&'static str),

    /// A duration argument exceeded one day
    #[error("Invalid value for --{0}: must be at most 86400 seconds")]
    DurationTooLong(&'static str),
}

/// Pitwall - Formula 1 race results and championship standings
#[derive(Parser, Debug)]
#[command(name = "pitwall")]
#[command(about = "Formula 1 race results and championship standings in the terminal")]
#[command(version)]
pub struct Cli {
    /// Season to show (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Seconds a fetched response is reused before refetching
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub ttl_secs: u64,

    /// Seconds between automatic dashboard refreshes
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub refresh_secs: u64,

    /// Seconds before an API request is abandoned
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Base URL of the OpenF1 API
    #[arg(long, value_name = "URL", default_value = OPENF1_BASE_URL)]
    pub base_url: String,

    /// Print the current race and standings as text and exit
    #[arg(long)]
    pub once: bool,

    /// File to write logs to while the dashboard is open
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub service: ServiceConfig,
    pub refresh: RefreshConfig,
    /// Per-request timeout for the API client
    pub request_timeout: Duration,
    pub base_url: String,
    /// Print a report instead of opening the dashboard
    pub once: bool,
    /// Where dashboard logs go
    pub log_file: PathBuf,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the year is out of range or a duration is zero or over a day
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let year = cli.year.unwrap_or_else(|| Local::now().year());
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CliError::InvalidYear(year));
        }

        let ttl = positive_secs(cli.ttl_secs, "ttl-secs")?;
        let interval = positive_secs(cli.refresh_secs, "refresh-secs")?;
        let request_timeout = positive_secs(cli.timeout_secs, "timeout-secs")?;

        Ok(StartupConfig {
            service: ServiceConfig { year, ttl },
            refresh: RefreshConfig {
                interval,
                enabled: !cli.once,
            },
            request_timeout,
            base_url: cli.base_url.clone(),
            once: cli.once,
            log_file: cli
                .log_file
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join("pitwall.log")),
        })
    }
}

fn positive_secs(secs: u64, flag: &'static str) -> Result<Duration, CliError> {
    if secs == 0 {
        return Err(CliError::ZeroDuration(flag));
    }
    if secs > MAX_DURATION_SECS {
        return Err(CliError::DurationTooLong(flag));
    }
    Ok(Duration::from_secs(secs))
}
