//! Hypothetical week simulator.

use std::collections::HashMap;

use super::ScenarioError;
use crate::calculate::compute_standings;
use crate::models::{OutcomeAssignment, Schedule, Standings};

/// Play one outcome assignment on a copy of `base` and recompute standings.
///
/// Each winner gains a win, each loser a loss, the season advances one week,
/// and ranks, magic numbers and statuses are recomputed. `base` is never
/// touched, so assignments can be simulated in any order or concurrently.
///
/// An empty schedule plays no games and advances no week: the result is just
/// `base` re-derived.
pub fn simulate(
    base: &Standings,
    schedule: &Schedule,
    assignment: &OutcomeAssignment,
) -> Result<Standings, ScenarioError> {
    if assignment.len() != schedule.len() {
        return Err(ScenarioError::MismatchedAssignmentLength {
            expected: schedule.len(),
            actual: assignment.len(),
        });
    }

    if schedule.is_empty() {
        return Ok(compute_standings(base.teams.clone(), base.season));
    }

    if base.season.remaining_weeks() == 0 {
        return Err(ScenarioError::InvalidSeasonParameters(
            "no weeks remain to simulate".to_string(),
        ));
    }

    let mut results: HashMap<&str, bool> = HashMap::with_capacity(schedule.len() * 2);
    for (matchup, &side) in schedule.matchups().iter().zip(assignment.sides()) {
        results.insert(matchup.team(side), true);
        results.insert(matchup.team(side.other()), false);
    }

    let mut applied = 0;
    let teams = base
        .teams
        .iter()
        .map(|team| match results.get(team.name.as_str()) {
            Some(&won) => {
                applied += 1;
                team.with_result(won)
            }
            None => team.clone(),
        })
        .collect();

    if applied != results.len() {
        return Err(ScenarioError::InvalidSchedule(
            "schedule names a team missing from the standings".to_string(),
        ));
    }

    Ok(compute_standings(teams, base.season.next_week()))
}
