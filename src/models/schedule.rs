//! Remaining matchups and outcome assignments over them.

use serde::{Deserialize, Serialize};

/// One undecided game between two teams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    pub team1: String,
    pub team2: String,
}

impl Matchup {
    pub fn new(team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            team1: team1.into(),
            team2: team2.into(),
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    /// The other team in this game, if `team` plays in it.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.team1 == team {
            Some(&self.team2)
        } else if self.team2 == team {
            Some(&self.team1)
        } else {
            None
        }
    }
}

/// Which team of a matchup won it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

/// A week's matchups. Order matters: outcome assignments are positional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    matchups: Vec<Matchup>,
}

impl Schedule {
    pub fn new(matchups: Vec<Matchup>) -> Self {
        Self { matchups }
    }

    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }

    pub fn len(&self) -> usize {
        self.matchups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchups.is_empty()
    }

    /// Position of the game `team` plays in, if any.
    pub fn slot_of(&self, team: &str) -> Option<usize> {
        self.matchups.iter().position(|m| m.involves(team))
    }

    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        self.matchups.iter().find_map(|m| m.opponent_of(team))
    }

    /// Keep only the matchups the predicate accepts, preserving order.
    pub fn retain<F>(&self, keep: F) -> Schedule
    where
        F: Fn(&Matchup) -> bool,
    {
        Schedule::new(self.matchups.iter().filter(|m| keep(m)).cloned().collect())
    }
}

impl From<Vec<Matchup>> for Schedule {
    fn from(matchups: Vec<Matchup>) -> Self {
        Self::new(matchups)
    }
}

/// The winner of every matchup in one permutation, slot by slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeAssignment {
    sides: Vec<Side>,
}

impl OutcomeAssignment {
    pub fn new(sides: Vec<Side>) -> Self {
        Self { sides }
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// Name of the winner at `slot`, resolved against the schedule.
    pub fn winner<'a>(&self, schedule: &'a Schedule, slot: usize) -> Option<&'a str> {
        let side = *self.sides.get(slot)?;
        schedule.matchups().get(slot).map(|m| m.team(side))
    }

    /// All winners in slot order.
    pub fn winners<'a>(&self, schedule: &'a Schedule) -> Vec<&'a str> {
        self.sides
            .iter()
            .zip(schedule.matchups())
            .map(|(&side, m)| m.team(side))
            .collect()
    }

    /// Whether `team` is recorded as winning its own game.
    pub fn team_won(&self, schedule: &Schedule, team: &str) -> bool {
        self.sides
            .iter()
            .zip(schedule.matchups())
            .any(|(&side, m)| m.team(side) == team)
    }
}
