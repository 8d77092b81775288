//! Outcome permutation generator.

use tracing::info;

use super::ScenarioError;
use crate::models::{OutcomeAssignment, Schedule, Side, Standings};

/// Absolute ceiling on matchups, whatever the configured cap says.
pub const HARD_MATCHUP_LIMIT: usize = 30;

/// Number of outcome assignments for `matchups` games.
pub fn permutation_count(matchups: usize) -> usize {
    1usize << matchups
}

/// Drop matchups whose two teams are both already clinched or eliminated.
///
/// Neither result can move any undecided team, so skipping them halves the
/// work for each one removed.
pub fn filter_locked_matchups(schedule: &Schedule, standings: &Standings) -> Schedule {
    let locked = |name: &str| {
        standings
            .team(name)
            .map(|t| t.status.is_terminal())
            .unwrap_or(false)
    };
    let filtered = schedule.retain(|m| !(locked(&m.team1) && locked(&m.team2)));
    info!(
        "Filtered schedule from {} to {} matchups",
        schedule.len(),
        filtered.len()
    );
    filtered
}

/// Fail before generation if the schedule is over the cap.
pub fn check_schedule_size(schedule: &Schedule, cap: usize) -> Result<(), ScenarioError> {
    let cap = cap.min(HARD_MATCHUP_LIMIT);
    if schedule.len() > cap {
        return Err(ScenarioError::IntractableScheduleSize {
            matchups: schedule.len(),
            cap,
        });
    }
    Ok(())
}

/// Every winner assignment for the schedule, materialized eagerly.
///
/// Lexicographic order with matchup 0 as the most significant digit and
/// `team1` winning before `team2`. An empty schedule yields exactly one,
/// empty, assignment.
pub fn generate_permutations(
    schedule: &Schedule,
    cap: usize,
) -> Result<Vec<OutcomeAssignment>, ScenarioError> {
    check_schedule_size(schedule, cap)?;

    let m = schedule.len();
    let permutations = (0..permutation_count(m))
        .map(|index| {
            let sides = (0..m)
                .map(|slot| {
                    if (index >> (m - 1 - slot)) & 1 == 1 {
                        Side::Team2
                    } else {
                        Side::Team1
                    }
                })
                .collect();
            OutcomeAssignment::new(sides)
        })
        .collect();

    Ok(permutations)
}
