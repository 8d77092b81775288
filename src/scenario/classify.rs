//! Scenario classifier.

use rayon::prelude::*;
use tracing::debug;

use super::{simulate, ScenarioError};
use crate::models::{
    OutcomeAssignment, ScenarioBucketMap, ScenarioBuckets, Schedule, Standings, TeamStatus,
};

/// Which teams get buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tracking {
    /// Only teams not yet clinched or eliminated
    #[default]
    Undecided,
    /// Every team in the standings
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Clinched,
    Eliminated,
    StillAlive,
}

impl From<TeamStatus> for Bucket {
    fn from(status: TeamStatus) -> Self {
        match status {
            TeamStatus::Clinched => Bucket::Clinched,
            TeamStatus::Eliminated => Bucket::Eliminated,
            _ => Bucket::StillAlive,
        }
    }
}

/// Names of the teams tracked under `tracking`, in standings order.
pub fn tracked_teams(base: &Standings, tracking: Tracking) -> Vec<String> {
    base.teams
        .iter()
        .filter(|t| tracking == Tracking::All || !t.status.is_terminal())
        .map(|t| t.name.clone())
        .collect()
}

/// Simulate every permutation and bucket each tracked team by its status.
///
/// With `parallel` set, permutations are fanned out over the rayon pool.
/// Results are collected by permutation index either way, so the bucket map is
/// identical to a sequential run.
pub fn classify(
    base: &Standings,
    schedule: &Schedule,
    permutations: &[OutcomeAssignment],
    tracking: Tracking,
    parallel: bool,
) -> Result<ScenarioBucketMap, ScenarioError> {
    let tracked = tracked_teams(base, tracking);

    let evaluate = |assignment: &OutcomeAssignment| -> Result<Vec<Bucket>, ScenarioError> {
        let outcome = simulate(base, schedule, assignment)?;
        Ok(tracked
            .iter()
            .map(|name| {
                outcome
                    .team(name)
                    .map(|t| Bucket::from(t.status))
                    .unwrap_or(Bucket::StillAlive)
            })
            .collect())
    };

    let per_permutation: Vec<Vec<Bucket>> = if parallel {
        permutations.par_iter().map(evaluate).collect::<Result<_, _>>()?
    } else {
        permutations.iter().map(evaluate).collect::<Result<_, _>>()?
    };

    let mut map: ScenarioBucketMap = tracked
        .iter()
        .map(|name| (name.clone(), ScenarioBuckets::default()))
        .collect();

    for (index, buckets) in per_permutation.iter().enumerate() {
        for (name, bucket) in tracked.iter().zip(buckets) {
            if let Some(entry) = map.get_mut(name) {
                match bucket {
                    Bucket::Clinched => entry.clinched_in.push(index),
                    Bucket::Eliminated => entry.eliminated_in.push(index),
                    Bucket::StillAlive => entry.still_alive_in.push(index),
                }
            }
        }
    }

    debug!(
        "Classified {} teams over {} permutations",
        tracked.len(),
        permutations.len()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::compute_standings;
    use crate::models::{Matchup, SeasonParameters, Team};
    use crate::scenario::generate_permutations;
    use pretty_assertions::assert_eq;

    fn base() -> Standings {
        compute_standings(
            vec![
                Team::new("A", 8, 1, 1100.0),
                Team::new("B", 7, 2, 1000.0),
                Team::new("C", 6, 3, 950.0),
                Team::new("D", 5, 4, 900.0),
            ],
            SeasonParameters::new(2, 10, 9),
        )
    }

    fn schedule() -> Schedule {
        Schedule::new(vec![Matchup::new("A", "B"), Matchup::new("C", "D")])
    }

    #[test]
    fn test_tracks_only_undecided_by_default() {
        let base = base();
        assert_eq!(tracked_teams(&base, Tracking::Undecided), vec!["B", "C"]);
        assert_eq!(tracked_teams(&base, Tracking::All).len(), 4);
    }

    #[test]
    fn test_leader_clinched_in_every_permutation() {
        let base = base();
        let s = schedule();
        let perms = generate_permutations(&s, 20).unwrap();
        let map = classify(&base, &s, &perms, Tracking::All, false).unwrap();

        assert_eq!(perms.len(), 4);
        assert_eq!(map["A"].clinched_in.len(), 4);
        assert_eq!(map["D"].eliminated_in.len(), 4);
    }

    #[test]
    fn test_buckets_for_contenders() {
        // perms: [A,C] [A,D] [B,C] [B,D]
        let base = base();
        let s = schedule();
        let perms = generate_permutations(&s, 20).unwrap();
        let map = classify(&base, &s, &perms, Tracking::Undecided, false).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["B"].clinched_in, vec![0, 1, 2, 3]);
        // C survives only by winning while A beats B
        assert_eq!(map["C"].clinched_in, vec![0]);
        assert_eq!(map["C"].eliminated_in, vec![1, 2, 3]);
        for buckets in map.values() {
            assert!(buckets.is_partition_of(perms.len()));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let base = base();
        let s = schedule();
        let perms = generate_permutations(&s, 20).unwrap();

        let sequential = classify(&base, &s, &perms, Tracking::All, false).unwrap();
        let parallel = classify(&base, &s, &perms, Tracking::All, true).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_empty_schedule_uses_current_status() {
        let base = base();
        let s = Schedule::default();
        let perms = generate_permutations(&s, 20).unwrap();
        let map = classify(&base, &s, &perms, Tracking::All, false).unwrap();

        assert_eq!(map["A"].clinched_in, vec![0]);
        assert_eq!(map["B"].still_alive_in, vec![0]);
        assert_eq!(map["C"].still_alive_in, vec![0]);
        assert_eq!(map["D"].eliminated_in, vec![0]);
    }

    #[test]
    fn test_mismatched_permutation_fails() {
        let base = base();
        let s = schedule();
        let bad = vec![OutcomeAssignment::new(vec![])];
        assert!(matches!(
            classify(&base, &s, &bad, Tracking::All, true),
            Err(ScenarioError::MismatchedAssignmentLength { .. })
        ));
    }
}
