//! Scenario engine.
//!
//! Enumerates every outcome of the remaining matchups and reduces the results
//! into minimal clinch/elimination conditions:
//! 1. Generate all outcome assignments for the (filtered) schedule
//! 2. Simulate each assignment on a private copy of the standings
//! 3. Classify every tracked team as clinched / eliminated / still alive
//! 4. Fold each bucket into the outcomes common to all of its permutations
//!
//! Cost is exponential in the matchup count: 2^m simulations, each re-sorting
//! the standings, so callers cap `m` (see [`EngineConfig::max_matchups`]).
//!
//! [`EngineConfig::max_matchups`]: crate::config::EngineConfig::max_matchups

mod classify;
mod engine;
mod permutations;
mod reduce;
mod simulate;

pub use classify::{classify, tracked_teams, Tracking};
pub use engine::{ScenarioEngine, ScenarioReport};
pub use permutations::{
    check_schedule_size, filter_locked_matchups, generate_permutations, permutation_count,
    HARD_MATCHUP_LIMIT,
};
pub use reduce::{reduce_bucket, reduce_scenarios};
pub use simulate::simulate;

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Schedule, SeasonParameters, Team};

/// Errors surfaced by the scenario engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("Invalid season parameters: {0}")]
    InvalidSeasonParameters(String),

    #[error("Invalid team list: {0}")]
    InvalidTeams(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Schedule has {matchups} matchups, above the cap of {cap}")]
    IntractableScheduleSize { matchups: usize, cap: usize },

    #[error("Outcome assignment has {actual} slots but the schedule has {expected} matchups")]
    MismatchedAssignmentLength { expected: usize, actual: usize },
}

/// Reject season shapes the engine cannot compute numbers for.
pub fn validate_season(season: &SeasonParameters, team_count: usize) -> Result<(), ScenarioError> {
    if season.total_weeks == 0 {
        return Err(ScenarioError::InvalidSeasonParameters(
            "season must have at least one week".to_string(),
        ));
    }
    if season.current_week > season.total_weeks {
        return Err(ScenarioError::InvalidSeasonParameters(format!(
            "current week {} is past the {}-week season",
            season.current_week, season.total_weeks
        )));
    }
    if season.playoff_spots == 0 || season.playoff_spots >= team_count {
        return Err(ScenarioError::InvalidSeasonParameters(format!(
            "playoff spots must be between 1 and {} for {} teams, got {}",
            team_count.saturating_sub(1),
            team_count,
            season.playoff_spots
        )));
    }
    if team_count % 2 == 1 {
        return Err(ScenarioError::InvalidSeasonParameters(format!(
            "{} teams means a bye every week, which is not supported",
            team_count
        )));
    }
    Ok(())
}

/// A schedule with games left to play needs a week left to play them in.
pub fn validate_weeks_remaining(
    season: &SeasonParameters,
    schedule: &Schedule,
) -> Result<(), ScenarioError> {
    if !schedule.is_empty() && season.remaining_weeks() == 0 {
        return Err(ScenarioError::InvalidSeasonParameters(format!(
            "no weeks remain to simulate, but {} matchups were given",
            schedule.len()
        )));
    }
    Ok(())
}

/// Team names must be unique.
pub fn validate_teams(teams: &[Team]) -> Result<(), ScenarioError> {
    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.name.as_str()) {
            return Err(ScenarioError::InvalidTeams(format!(
                "duplicate team name '{}'",
                team.name
            )));
        }
    }
    Ok(())
}

/// Every matchup must pair two distinct known teams, each playing at most once.
pub fn validate_schedule(schedule: &Schedule, teams: &[Team]) -> Result<(), ScenarioError> {
    let known: HashSet<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    let mut playing = HashSet::new();

    for matchup in schedule.matchups() {
        if matchup.team1 == matchup.team2 {
            return Err(ScenarioError::InvalidSchedule(format!(
                "'{}' cannot play itself",
                matchup.team1
            )));
        }
        for name in [matchup.team1.as_str(), matchup.team2.as_str()] {
            if !known.contains(name) {
                return Err(ScenarioError::InvalidSchedule(format!(
                    "unknown team '{}'",
                    name
                )));
            }
            if !playing.insert(name) {
                return Err(ScenarioError::InvalidSchedule(format!(
                    "'{}' is scheduled more than once",
                    name
                )));
            }
        }
    }
    Ok(())
}
