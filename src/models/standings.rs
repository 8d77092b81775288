//! Season parameters and ranked standings snapshots.

use serde::{Deserialize, Serialize};

use super::Team;

/// Shape of the season the standings are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonParameters {
    /// Number of playoff berths (k)
    pub playoff_spots: usize,

    /// Regular-season length in weeks
    #[serde(alias = "weeks_in_season")]
    pub total_weeks: u32,

    /// Weeks already played
    pub current_week: u32,
}

impl SeasonParameters {
    pub fn new(playoff_spots: usize, total_weeks: u32, current_week: u32) -> Self {
        Self {
            playoff_spots,
            total_weeks,
            current_week,
        }
    }

    /// Weeks left to play; zero once the regular season is over.
    pub fn remaining_weeks(&self) -> u32 {
        self.total_weeks.saturating_sub(self.current_week)
    }

    /// The same season one week later.
    pub fn next_week(&self) -> Self {
        Self {
            current_week: self.current_week + 1,
            ..*self
        }
    }
}

/// Teams in standings order with rank, magic numbers and status filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub season: SeasonParameters,
    pub teams: Vec<Team>,
}

impl Standings {
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// Names of teams that are neither clinched nor eliminated.
    pub fn undecided(&self) -> Vec<&str> {
        self.teams
            .iter()
            .filter(|t| !t.status.is_terminal())
            .map(|t| t.name.as_str())
            .collect()
    }

    /// True when the playoff boundary could not be located and some teams
    /// carry neither magic number.
    pub fn has_unresolved_boundary(&self) -> bool {
        self.teams
            .iter()
            .any(|t| t.clinch_magic_number.is_none() && t.elimination_number.is_none())
    }

    /// Teams one result away from clinching or elimination.
    pub fn critical_teams(&self) -> Vec<&Team> {
        self.teams
            .iter()
            .filter(|t| t.clinch_magic_number == Some(1) || t.elimination_number == Some(1))
            .collect()
    }
}
