//! Minimal-condition reducer.
//!
//! Folds the permutations in a bucket into the outcomes they all agree on.
//! This is a greedy literal-agreement fold, not a minimal-cover search: the
//! condition is implied by every permutation in the bucket, but when a bucket
//! is reachable through several disjoint conditions the fold wildcards the
//! slots they disagree on instead of listing each one.

use std::collections::BTreeMap;

use crate::models::{
    MinimalCondition, OutcomeAssignment, PathReduction, ScenarioBucketMap, Schedule,
    TeamScenarios,
};

fn fold_path<'a, I>(mut assignments: I, schedule: &Schedule) -> Option<MinimalCondition>
where
    I: Iterator<Item = &'a OutcomeAssignment>,
{
    let first = assignments.next()?;
    let mut condition = MinimalCondition::from_assignment(first, schedule);
    for assignment in assignments {
        condition.fold(assignment, schedule);
    }
    Some(condition)
}

/// Reduce one bucket of permutation indices for `team`.
///
/// Returns `None` for an empty bucket and [`PathReduction::Regardless`] when
/// the bucket holds every permutation. Otherwise the bucket is split by
/// whether `team` won its own game and each half is folded separately. A team
/// with no game in the schedule never records a win, so everything lands on
/// its loss path.
pub fn reduce_bucket(
    team: &str,
    indices: &[usize],
    permutations: &[OutcomeAssignment],
    schedule: &Schedule,
) -> Option<PathReduction> {
    if indices.is_empty() {
        return None;
    }
    if indices.len() == permutations.len() {
        return Some(PathReduction::Regardless);
    }

    let (won, lost): (Vec<&OutcomeAssignment>, Vec<&OutcomeAssignment>) = indices
        .iter()
        .filter_map(|&i| permutations.get(i))
        .partition(|a| a.team_won(schedule, team));

    Some(PathReduction::Paths {
        win_path: fold_path(won.into_iter(), schedule),
        loss_path: fold_path(lost.into_iter(), schedule),
    })
}

/// Clinch and elimination reductions for every team in the bucket map.
pub fn reduce_scenarios(
    buckets: &ScenarioBucketMap,
    permutations: &[OutcomeAssignment],
    schedule: &Schedule,
) -> BTreeMap<String, TeamScenarios> {
    buckets
        .iter()
        .map(|(team, b)| {
            let scenarios = TeamScenarios {
                clinch: reduce_bucket(team, &b.clinched_in, permutations, schedule),
                eliminate: reduce_bucket(team, &b.eliminated_in, permutations, schedule),
            };
            (team.clone(), scenarios)
        })
        .collect()
}
