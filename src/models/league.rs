//! League snapshot document: settings, team records, remaining matchups and
//! completed-week scores.

use serde::{Deserialize, Serialize};

use super::{Matchup, Schedule, SeasonParameters, Team};

/// Name used when a snapshot does not carry one.
pub const DEFAULT_LEAGUE_NAME: &str = "league";

/// League-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub season: Option<i32>,

    #[serde(flatten)]
    pub params: SeasonParameters,

    /// Informational; the only tiebreaker applied is points for.
    #[serde(default)]
    pub tiebreaker: Option<String>,
}

/// Win/loss/tie record as reported by the league provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
    /// Accepted but not modeled by the scenario engine
    #[serde(default)]
    pub ties: u32,
}

/// A team entry in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub record: WinLossRecord,
    pub points_for: f64,
}

impl TeamEntry {
    pub fn to_team(&self) -> Team {
        Team::new(
            self.name.clone(),
            self.record.wins,
            self.record.losses,
            self.points_for,
        )
    }
}

/// Final score of one completed game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub home: String,
    pub home_score: f64,
    pub away: String,
    pub away_score: f64,
}

/// Scores of every game in one completed week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekResult {
    pub week: u32,
    pub games: Vec<GameResult>,
}

impl WeekResult {
    /// Score and opponent for `team` this week.
    pub fn score_of(&self, team: &str) -> Option<(f64, &str)> {
        self.games.iter().find_map(|g| {
            if g.home == team {
                Some((g.home_score, g.away.as_str()))
            } else if g.away == team {
                Some((g.away_score, g.home.as_str()))
            } else {
                None
            }
        })
    }
}

/// Full input snapshot for one league week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub league_settings: LeagueSettings,

    pub teams: Vec<TeamEntry>,

    #[serde(default, alias = "next_week_matchups")]
    pub current_week_matchups: Vec<Matchup>,

    #[serde(default)]
    pub weekly_results: Vec<WeekResult>,
}

impl LeagueSnapshot {
    pub fn season(&self) -> SeasonParameters {
        self.league_settings.params
    }

    pub fn teams(&self) -> Vec<Team> {
        self.teams.iter().map(TeamEntry::to_team).collect()
    }

    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.current_week_matchups.clone())
    }

    /// Display name, falling back to a generic label.
    pub fn league_name(&self) -> &str {
        self.league_settings
            .name
            .as_deref()
            .unwrap_or(DEFAULT_LEAGUE_NAME)
    }
}
