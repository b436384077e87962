//! Data orchestration for the dashboard
//!
//! `PaddockService` asks the response cache for sessions, results and drivers,
//! then hands them to the standings engine. Every query goes through the cache,
//! so a failing API degrades to stale or empty data instead of an error.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use futures::future::join_all;
use tracing::info;

use crate::cache::{DataSource, Fetched, ResponseCache};
use crate::data::{CacheKey, Driver, OpenF1Client, RaceResult, Session};
use crate::standings::{
    compute_constructor_standings, compute_driver_standings, points_for_position, Attribution,
    ConstructorStanding, DriverStanding, Roster,
};

/// Maximum number of classification rows shown for the current race
pub const MAX_RESULT_ROWS: usize = 20;

/// Settings for the data service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Championship season to query
    pub year: i32,
    /// How long a fetched response is served without refetching
    pub ttl: Duration,
}

/// One row of a race classification, joined with the roster
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedResult {
    pub result: RaceResult,
    pub attribution: Attribution,
    /// Points scored with this result
    pub points: u32,
}

/// The most recent race and its classification
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentRace {
    pub session: Session,
    /// Classified finishers first by position, then non-finishers
    pub results: Vec<ClassifiedResult>,
}

/// Everything the dashboard shows, built in one refresh
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// `None` when the season has no race sessions (yet)
    pub current_race: Option<CurrentRace>,
    pub driver_standings: Vec<DriverStanding>,
    pub constructor_standings: Vec<ConstructorStanding>,
    /// Some current race data came from a failed refresh
    pub current_race_degraded: bool,
    /// Some standings data came from a failed refresh
    pub standings_degraded: bool,
    /// When this snapshot was built
    pub refreshed_at: DateTime<Local>,
}

/// Fetches race data through a shared cache and computes the standings
#[derive(Debug)]
pub struct PaddockService {
    cache: Arc<ResponseCache>,
    client: OpenF1Client,
    config: ServiceConfig,
}

impl PaddockService {
    pub fn new(cache: Arc<ResponseCache>, client: OpenF1Client, config: ServiceConfig) -> Self {
        Self {
            cache,
            client,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// All race sessions of the configured season
    pub async fn sessions(&self) -> Fetched<Vec<Session>> {
        let key = CacheKey::Sessions {
            year: self.config.year,
        };
        self.cache
            .get_or_fetch_traced(&key.to_string(), self.config.ttl, || {
                self.client.fetch_race_sessions(self.config.year)
            })
            .await
    }

    /// The latest race session, i.e. the last one the API lists
    pub async fn current_session(&self) -> Fetched<Option<Session>> {
        let sessions = self.sessions().await;
        Fetched {
            data: sessions.data.last().cloned(),
            source: sessions.source,
        }
    }

    /// Results of one session, finishers by position and non-finishers last
    pub async fn race_results(&self, session_key: u32) -> Fetched<Vec<RaceResult>> {
        let mut fetched = self.session_results(session_key).await;
        fetched
            .data
            .sort_by_key(|r| (r.position.is_none(), r.position));
        fetched
    }

    /// The driver roster of the configured season
    pub async fn drivers(&self) -> Fetched<Vec<Driver>> {
        let key = CacheKey::Drivers {
            year: self.config.year,
        };
        self.cache
            .get_or_fetch_traced(&key.to_string(), self.config.ttl, || {
                self.client.fetch_drivers(self.config.year)
            })
            .await
    }

    /// Results of every race session of the season, concatenated
    ///
    /// Per-session fetches run concurrently, each under its own cache key.
    pub async fn all_results(&self) -> Fetched<Vec<RaceResult>> {
        let sessions = self.sessions().await;
        let per_session = join_all(
            sessions
                .data
                .iter()
                .map(|session| self.session_results(session.session_key)),
        )
        .await;

        let mut sources = vec![sessions.source];
        let mut results = Vec::new();
        for fetched in per_session {
            sources.push(fetched.source);
            results.extend(fetched.data);
        }

        Fetched {
            data: results,
            source: worst_source(&sources),
        }
    }

    /// Builds a full dashboard snapshot
    ///
    /// The current race, all season results and the roster are queried
    /// concurrently; the standings are computed once all three have resolved.
    pub async fn snapshot(&self) -> Dashboard {
        let (current, all_results, drivers) = tokio::join!(
            self.current_race_results(),
            self.all_results(),
            self.drivers()
        );

        let driver_standings = compute_driver_standings(&all_results.data, &drivers.data);
        let constructor_standings = compute_constructor_standings(&driver_standings);

        let roster = Roster::new(&drivers.data);
        let current_source = worst_source(&[current.source, drivers.source]);
        let current_race = current.data.map(|(session, results)| CurrentRace {
            session,
            results: results
                .into_iter()
                .map(|result| ClassifiedResult {
                    attribution: roster.attribution(result.driver_number),
                    points: points_for_position(result.position),
                    result,
                })
                .collect(),
        });

        info!(
            year = self.config.year,
            drivers = driver_standings.len(),
            constructors = constructor_standings.len(),
            current_race = current_race.as_ref().map(|r| r.session.location.as_str()),
            "dashboard refreshed"
        );

        Dashboard {
            current_race,
            driver_standings,
            constructor_standings,
            current_race_degraded: current_source.is_degraded(),
            standings_degraded: worst_source(&[all_results.source, drivers.source])
                .is_degraded(),
            refreshed_at: Local::now(),
        }
    }

    async fn current_race_results(&self) -> Fetched<Option<(Session, Vec<RaceResult>)>> {
        let current = self.current_session().await;
        match current.data {
            Some(session) => {
                let results = self.race_results(session.session_key).await;
                Fetched {
                    data: Some((session, results.data)),
                    source: worst_source(&[current.source, results.source]),
                }
            }
            None => Fetched {
                data: None,
                source: current.source,
            },
        }
    }

    async fn session_results(&self, session_key: u32) -> Fetched<Vec<RaceResult>> {
        let key = CacheKey::Results { session_key };
        self.cache
            .get_or_fetch_traced(&key.to_string(), self.config.ttl, || {
                self.client.fetch_results(session_key)
            })
            .await
    }
}

/// The most degraded of several sources
fn worst_source(sources: &[DataSource]) -> DataSource {
    let rank = |source: &DataSource| match source {
        DataSource::Cached => 0,
        DataSource::Fresh => 1,
        DataSource::Stale => 2,
        DataSource::Empty => 3,
    };
    sources
        .iter()
        .copied()
        .max_by_key(rank)
        .unwrap_or(DataSource::Fresh)
}
