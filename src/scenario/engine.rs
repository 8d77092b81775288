//! End-to-end scenario run for one league snapshot.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    classify, filter_locked_matchups, generate_permutations, reduce_scenarios, validate_schedule,
    validate_season, validate_teams, validate_weeks_remaining, ScenarioError,
};
use crate::calculate::compute_standings;
use crate::config::EngineConfig;
use crate::models::{
    LeagueSnapshot, RunId, ScenarioBucketMap, Schedule, SeasonParameters, Standings, Team,
    TeamScenarios, DEFAULT_LEAGUE_NAME,
};

/// Everything one engine run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub run_id: RunId,

    pub league: String,

    /// Current standings before any simulated result
    pub standings: Standings,

    /// Schedule the permutations are aligned to (after filtering)
    pub schedule: Schedule,

    pub permutation_count: usize,

    pub buckets: ScenarioBucketMap,

    pub scenarios: BTreeMap<String, TeamScenarios>,
}

/// Runs the generator, simulator, classifier and reducer in sequence.
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    config: EngineConfig,
}

impl ScenarioEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the engine on a league snapshot document.
    pub fn run(&self, snapshot: &LeagueSnapshot) -> Result<ScenarioReport, ScenarioError> {
        self.execute(
            snapshot.league_name(),
            snapshot.league_settings.season,
            snapshot.teams(),
            snapshot.season(),
            snapshot.schedule(),
        )
    }

    /// Run the engine on raw teams, season and schedule.
    pub fn evaluate(
        &self,
        teams: Vec<Team>,
        season: SeasonParameters,
        schedule: Schedule,
    ) -> Result<ScenarioReport, ScenarioError> {
        self.execute(DEFAULT_LEAGUE_NAME, None, teams, season, schedule)
    }

    fn execute(
        &self,
        league: &str,
        year: Option<i32>,
        teams: Vec<Team>,
        season: SeasonParameters,
        schedule: Schedule,
    ) -> Result<ScenarioReport, ScenarioError> {
        let started = Instant::now();
        info!("Running scenarios for {} week {}", league, season.current_week);

        validate_season(&season, teams.len())?;
        validate_teams(&teams)?;
        validate_schedule(&schedule, &teams)?;
        validate_weeks_remaining(&season, &schedule)?;

        let standings = compute_standings(teams, season);
        info!(
            "Standings computed: {} teams, {} undecided",
            standings.teams.len(),
            standings.undecided().len()
        );

        let schedule = if self.config.filter_locked_matchups {
            filter_locked_matchups(&schedule, &standings)
        } else {
            schedule
        };

        let permutations = generate_permutations(&schedule, self.config.max_matchups)?;
        info!(
            "Simulating {} permutations of {} matchups",
            permutations.len(),
            schedule.len()
        );

        let buckets = classify(
            &standings,
            &schedule,
            &permutations,
            self.config.tracking(),
            self.config.parallel,
        )?;
        let scenarios = reduce_scenarios(&buckets, &permutations, &schedule);

        info!(
            "Scenario run finished in {:?} ({} teams tracked)",
            started.elapsed(),
            buckets.len()
        );

        Ok(ScenarioReport {
            run_id: RunId::for_week(league, year, season.current_week),
            league: league.to_string(),
            standings,
            schedule,
            permutation_count: permutations.len(),
            buckets,
            scenarios,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Matchup, OutcomeAssignment, PathReduction, Side, TeamStatus};
    use crate::scenario::simulate;
    use pretty_assertions::assert_eq;

    fn four_teams() -> Vec<Team> {
        vec![
            Team::new("A", 8, 1, 1100.0),
            Team::new("B", 7, 2, 1000.0),
            Team::new("C", 6, 3, 950.0),
            Team::new("D", 5, 4, 900.0),
        ]
    }

    fn schedule() -> Schedule {
        Schedule::new(vec![Matchup::new("A", "B"), Matchup::new("C", "D")])
    }

    #[test]
    fn test_default_run_tracks_undecided() {
        let engine = ScenarioEngine::default();
        let report = engine
            .evaluate(four_teams(), SeasonParameters::new(2, 10, 9), schedule())
            .unwrap();

        assert_eq!(report.permutation_count, 4);
        assert_eq!(
            report.buckets.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["B", "C"]
        );
        assert_eq!(report.scenarios["B"].clinch, Some(PathReduction::Regardless));
        assert_eq!(report.scenarios["B"].eliminate, None);
    }

    #[test]
    fn test_tracking_decided_teams() {
        let engine = ScenarioEngine::new(EngineConfig {
            track_decided_teams: true,
            ..EngineConfig::default()
        });
        let report = engine
            .evaluate(four_teams(), SeasonParameters::new(2, 10, 9), schedule())
            .unwrap();

        assert_eq!(report.buckets["A"].clinched_in.len(), 4);
        assert_eq!(report.buckets["D"].eliminated_in.len(), 4);
    }

    #[test]
    fn test_contender_conditions() {
        let engine = ScenarioEngine::default();
        let report = engine
            .evaluate(four_teams(), SeasonParameters::new(2, 10, 9), schedule())
            .unwrap();

        let c = &report.scenarios["C"];
        match c.clinch.as_ref().unwrap() {
            PathReduction::Paths {
                win_path,
                loss_path,
            } => {
                let win = win_path.as_ref().unwrap();
                assert_eq!(
                    win.slots(),
                    &[Some("A".to_string()), Some("C".to_string())]
                );
                assert!(loss_path.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(c.eliminate.is_some());
    }

    #[test]
    fn test_invalid_params_rejected_before_work() {
        let engine = ScenarioEngine::default();
        let err = engine
            .evaluate(four_teams(), SeasonParameters::new(4, 10, 9), schedule())
            .unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidSeasonParameters(_)));
    }

    #[test]
    fn test_finished_season_with_matchups_rejected() {
        for filter_locked_matchups in [true, false] {
            let engine = ScenarioEngine::new(EngineConfig {
                filter_locked_matchups,
                ..EngineConfig::default()
            });
            let err = engine
                .evaluate(four_teams(), SeasonParameters::new(2, 10, 10), schedule())
                .unwrap_err();
            assert!(
                matches!(err, ScenarioError::InvalidSeasonParameters(ref msg) if msg.contains("no weeks remain")),
                "got {:?}",
                err
            );
        }

        let report = ScenarioEngine::default()
            .evaluate(four_teams(), SeasonParameters::new(2, 10, 10), Schedule::default())
            .unwrap();
        assert_eq!(report.permutation_count, 1);
    }

    #[test]
    fn test_cap_surfaced() {
        let engine = ScenarioEngine::new(EngineConfig {
            max_matchups: 1,
            ..EngineConfig::default()
        });
        let err = engine
            .evaluate(four_teams(), SeasonParameters::new(2, 10, 9), schedule())
            .unwrap_err();
        assert_eq!(
            err,
            ScenarioError::IntractableScheduleSize {
                matchups: 2,
                cap: 1
            }
        );
    }

    #[test]
    fn test_filter_drops_locked_game() {
        // A clinched and D eliminated; their game cannot matter
        let teams = vec![
            Team::new("A", 9, 0, 0.0),
            Team::new("B", 5, 4, 0.0),
            Team::new("C", 5, 4, 0.0),
            Team::new("D", 0, 9, 0.0),
            Team::new("E", 4, 5, 0.0),
            Team::new("F", 4, 5, 0.0),
        ];
        let schedule = Schedule::new(vec![
            Matchup::new("A", "D"),
            Matchup::new("B", "E"),
            Matchup::new("C", "F"),
        ]);

        let report = ScenarioEngine::default()
            .evaluate(teams.clone(), SeasonParameters::new(2, 10, 9), schedule.clone())
            .unwrap();
        assert_eq!(report.schedule.len(), 2);
        assert_eq!(report.permutation_count, 4);
        assert_eq!(report.standings.team("A").unwrap().status, TeamStatus::Clinched);

        let unfiltered = ScenarioEngine::new(EngineConfig {
            filter_locked_matchups: false,
            ..EngineConfig::default()
        })
        .evaluate(teams, SeasonParameters::new(2, 10, 9), schedule)
        .unwrap();
        assert_eq!(unfiltered.permutation_count, 8);
    }

    #[test]
    fn test_empty_schedule_uses_current_status() {
        let engine = ScenarioEngine::new(EngineConfig {
            track_decided_teams: true,
            ..EngineConfig::default()
        });
        let report = engine
            .evaluate(
                four_teams(),
                SeasonParameters::new(2, 10, 9),
                Schedule::default(),
            )
            .unwrap();

        assert_eq!(report.permutation_count, 1);
        assert_eq!(report.buckets["A"].clinched_in, vec![0]);
        assert_eq!(report.buckets["C"].still_alive_in, vec![0]);
        assert_eq!(report.buckets["D"].eliminated_in, vec![0]);
        assert_eq!(report.scenarios["A"].clinch, Some(PathReduction::Regardless));
        assert!(report.scenarios["C"].is_empty());
    }

    #[test]
    fn test_team_tied_with_cutoff_gets_clinch_number() {
        let teams = vec![
            Team::new("A", 9, 3, 1500.0),
            Team::new("B", 8, 4, 1400.0),
            Team::new("C", 8, 4, 1300.0),
            Team::new("D", 6, 6, 1200.0),
        ];
        let report = ScenarioEngine::default()
            .evaluate(teams, SeasonParameters::new(2, 14, 12), Schedule::default())
            .unwrap();

        let c = report.standings.team("C").unwrap();
        assert_eq!(c.rank, 3);
        // 14 + 1 - 8 - 6
        assert_eq!(c.clinch_magic_number, Some(1));
        assert_eq!(c.elimination_number, None);
    }

    #[test]
    fn test_conditions_hold_for_every_bucket_member() {
        let teams = vec![
            Team::new("A", 7, 5, 1500.0),
            Team::new("B", 7, 5, 1400.0),
            Team::new("C", 6, 6, 1300.0),
            Team::new("D", 6, 6, 1200.0),
            Team::new("E", 5, 7, 1100.0),
            Team::new("F", 5, 7, 1000.0),
        ];
        let schedule = Schedule::new(vec![
            Matchup::new("A", "F"),
            Matchup::new("B", "C"),
            Matchup::new("D", "E"),
        ]);
        let report = ScenarioEngine::default()
            .evaluate(teams, SeasonParameters::new(3, 14, 12), schedule)
            .unwrap();
        let permutations =
            crate::scenario::generate_permutations(&report.schedule, 20).unwrap();

        for (team, buckets) in &report.buckets {
            assert!(buckets.is_partition_of(report.permutation_count));
            let scenarios = &report.scenarios[team];
            for (indices, reduction) in [
                (&buckets.clinched_in, &scenarios.clinch),
                (&buckets.eliminated_in, &scenarios.eliminate),
            ] {
                let Some(PathReduction::Paths {
                    win_path,
                    loss_path,
                }) = reduction
                else {
                    continue;
                };
                for &i in indices.iter() {
                    let assignment = &permutations[i];
                    let path = if assignment.team_won(&report.schedule, team) {
                        win_path
                    } else {
                        loss_path
                    };
                    assert!(path
                        .as_ref()
                        .unwrap()
                        .is_satisfied_by(assignment, &report.schedule));
                }
            }
        }
    }

    #[test]
    fn test_wildcard_concretizations_stay_in_bucket() {
        let report = ScenarioEngine::default()
            .evaluate(four_teams(), SeasonParameters::new(2, 10, 9), schedule())
            .unwrap();
        let Some(PathReduction::Paths {
            loss_path: Some(loss_path),
            ..
        }) = &report.scenarios["C"].eliminate
        else {
            panic!("C should have an elimination loss path");
        };
        // C loses to D; the A/B game is a wildcard
        assert_eq!(loss_path.slots(), &[None, Some("D".to_string())]);

        for first in [Side::Team1, Side::Team2] {
            let assignment = OutcomeAssignment::new(vec![first, Side::Team2]);
            let after = simulate(&report.standings, &report.schedule, &assignment).unwrap();
            assert_eq!(after.team("C").unwrap().status, TeamStatus::Eliminated);
        }
    }

    #[test]
    fn test_run_from_snapshot() {
        let snapshot: LeagueSnapshot = serde_json::from_str(
            r#"{
                "league_settings": {"name": "Greenwood", "season": 2024,
                    "playoff_spots": 2, "weeks_in_season": 10, "current_week": 9},
                "teams": [
                    {"name": "A", "record": {"wins": 8, "losses": 1}, "points_for": 1100},
                    {"name": "B", "record": {"wins": 7, "losses": 2}, "points_for": 1000},
                    {"name": "C", "record": {"wins": 6, "losses": 3}, "points_for": 950},
                    {"name": "D", "record": {"wins": 5, "losses": 4}, "points_for": 900}
                ],
                "current_week_matchups": [
                    {"team1": "A", "team2": "B"}, {"team1": "C", "team2": "D"}
                ]
            }"#,
        )
        .unwrap();

        let report = ScenarioEngine::default().run(&snapshot).unwrap();
        assert_eq!(report.league, "Greenwood");
        assert_eq!(report.run_id, RunId::for_week("Greenwood", Some(2024), 9));
        assert_eq!(report.permutation_count, 4);
    }
}
