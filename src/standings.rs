//! Championship standings
//!
//! Folds race results into ranked driver standings, and driver standings into
//! ranked constructor standings, under the fixed points schema:
//!
//! | Position | 1  | 2  | 3  | 4  | 5  | 6 | 7 | 8 | 9 | 10 |
//! |----------|----|----|----|----|----|---|---|---|---|----|
//! | Points   | 25 | 18 | 15 | 12 | 10 | 8 | 6 | 4 | 2 | 1  |
//!
//! Only scoring results count. A driver whose results are all outside the top ten
//! (or DNF) does not appear in the standings at all.
//!
//! Ties on points keep the order in which the tied entries first appeared in the
//! input; there is no secondary sort key.

use std::collections::HashMap;
use std::fmt;

use crate::data::{Driver, RaceResult};

/// Points awarded for positions 1 through 10
const POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points for a finishing position; 0 for DNF or anything outside the top ten
pub fn points_for_position(position: Option<u32>) -> u32 {
    match position {
        Some(p @ 1..=10) => POINTS[(p - 1) as usize],
        _ => 0,
    }
}

/// Who a result is attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    /// The driver number was found in the roster
    Roster { full_name: String, team_name: String },
    /// The driver number is missing from the roster
    Unknown,
}

impl Attribution {
    /// Display name, "Unknown" when not in the roster
    pub fn full_name(&self) -> &str {
        match self {
            Attribution::Roster { full_name, .. } => full_name,
            Attribution::Unknown => "Unknown",
        }
    }

    /// The team this driver scores for; a blank roster team name is [`Team::Unknown`]
    pub fn team(&self) -> Team {
        match self {
            Attribution::Roster { team_name, .. } if !team_name.trim().is_empty() => {
                Team::Named(team_name.clone())
            }
            _ => Team::Unknown,
        }
    }
}

/// A constructor, or the bucket for drivers missing from the roster
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Team {
    Named(String),
    Unknown,
}

impl Team {
    /// The team name, `None` for [`Team::Unknown`]
    pub fn name(&self) -> Option<&str> {
        match self {
            Team::Named(name) => Some(name),
            Team::Unknown => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Unknown"))
    }
}

/// Season roster indexed by driver number
///
/// When the roster lists a number more than once, the first record wins.
#[derive(Debug, Default)]
pub struct Roster<'a> {
    by_number: HashMap<u32, &'a Driver>,
}

impl<'a> Roster<'a> {
    pub fn new(drivers: &'a [Driver]) -> Self {
        let mut by_number = HashMap::with_capacity(drivers.len());
        for driver in drivers {
            by_number.entry(driver.driver_number).or_insert(driver);
        }
        Self { by_number }
    }

    /// Resolves a driver number to its attribution
    pub fn attribution(&self, driver_number: u32) -> Attribution {
        match self.by_number.get(&driver_number) {
            Some(driver) => Attribution::Roster {
                full_name: driver.full_name(),
                team_name: driver.team_name.clone(),
            },
            None => Attribution::Unknown,
        }
    }

    /// The raw roster record for a driver number
    pub fn get(&self, driver_number: u32) -> Option<&'a Driver> {
        self.by_number.get(&driver_number).copied()
    }
}

/// A driver's position in the championship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverStanding {
    pub driver_number: u32,
    pub attribution: Attribution,
    pub points: u32,
    pub wins: u32,
    /// 1-based, dense
    pub rank: usize,
}

impl DriverStanding {
    pub fn full_name(&self) -> &str {
        self.attribution.full_name()
    }

    pub fn team(&self) -> Team {
        self.attribution.team()
    }
}

/// A team's position in the constructors' championship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorStanding {
    pub team: Team,
    pub points: u32,
    pub wins: u32,
    /// 1-based, dense
    pub rank: usize,
}

/// Computes driver standings from an unordered set of results
///
/// Results outside the top ten are ignored entirely. Drivers missing from
/// `drivers` are attributed as [`Attribution::Unknown`].
pub fn compute_driver_standings(
    results: &[RaceResult],
    drivers: &[Driver],
) -> Vec<DriverStanding> {
    let roster = Roster::new(drivers);
    let mut index: HashMap<u32, usize> = HashMap::new();
    let mut standings: Vec<DriverStanding> = Vec::new();

    for result in results {
        let points = points_for_position(result.position);
        if points == 0 {
            continue;
        }

        let slot = *index.entry(result.driver_number).or_insert_with(|| {
            standings.push(DriverStanding {
                driver_number: result.driver_number,
                attribution: roster.attribution(result.driver_number),
                points: 0,
                wins: 0,
                rank: 0,
            });
            standings.len() - 1
        });

        let standing = &mut standings[slot];
        standing.points += points;
        if result.position == Some(1) {
            standing.wins += 1;
        }
    }

    // Stable sort: equal points keep first-appearance order.
    standings.sort_by(|a, b| b.points.cmp(&a.points));
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i + 1;
    }
    standings
}

/// Reduces driver standings into constructor standings
pub fn compute_constructor_standings(
    driver_standings: &[DriverStanding],
) -> Vec<ConstructorStanding> {
    let mut index: HashMap<Team, usize> = HashMap::new();
    let mut standings: Vec<ConstructorStanding> = Vec::new();

    for driver in driver_standings {
        let team = driver.team();
        let slot = match index.get(&team) {
            Some(&slot) => slot,
            None => {
                standings.push(ConstructorStanding {
                    team: team.clone(),
                    points: 0,
                    wins: 0,
                    rank: 0,
                });
                index.insert(team, standings.len() - 1);
                standings.len() - 1
            }
        };

        let standing = &mut standings[slot];
        standing.points += driver.points;
        standing.wins += driver.wins;
    }

    standings.sort_by(|a, b| b.points.cmp(&a.points));
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i + 1;
    }
    standings
}
