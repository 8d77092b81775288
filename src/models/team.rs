//! Team standings record and playoff status.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Playoff status of a team, derived from its magic numbers.
///
/// Serialized as its display label, e.g. `"In contention, needs 2 win(s) to clinch"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamStatus {
    Clinched,
    Eliminated,
    /// Season is over and the team is neither in nor out on record alone.
    Bubble,
    NeedsHelpToClinch,
    NeedsHelpToAvoidElimination,
    InContention { wins_to_clinch: u32 },
    OnTheBrink { losses_to_elimination: u32 },
    Unknown,
}

impl TeamStatus {
    /// Clinched and eliminated teams cannot change status any more.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TeamStatus::Clinched | TeamStatus::Eliminated)
    }
}

impl Default for TeamStatus {
    fn default() -> Self {
        TeamStatus::Unknown
    }
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamStatus::Clinched => write!(f, "Clinched"),
            TeamStatus::Eliminated => write!(f, "Eliminated"),
            TeamStatus::Bubble => write!(f, "Bubble — requires tiebreaker"),
            TeamStatus::NeedsHelpToClinch => write!(f, "Needs help to clinch (tiebreaker)"),
            TeamStatus::NeedsHelpToAvoidElimination => {
                write!(f, "Needs help to avoid elimination (tiebreaker)")
            }
            TeamStatus::InContention { wins_to_clinch } => {
                write!(f, "{}{}{}", NEEDS_PREFIX, wins_to_clinch, NEEDS_SUFFIX)
            }
            TeamStatus::OnTheBrink {
                losses_to_elimination,
            } => write!(f, "{}{}{}", BRINK_PREFIX, losses_to_elimination, BRINK_SUFFIX),
            TeamStatus::Unknown => write!(f, "Status Unknown"),
        }
    }
}

const NEEDS_PREFIX: &str = "In contention, needs ";
const NEEDS_SUFFIX: &str = " win(s) to clinch";
const BRINK_PREFIX: &str = "In contention, mathematically eliminated with ";
const BRINK_SUFFIX: &str = " loss(es)";

/// Label that does not name any [`TeamStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown team status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for TeamStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s {
            "Clinched" => TeamStatus::Clinched,
            "Eliminated" => TeamStatus::Eliminated,
            "Bubble — requires tiebreaker" => TeamStatus::Bubble,
            "Needs help to clinch (tiebreaker)" => TeamStatus::NeedsHelpToClinch,
            "Needs help to avoid elimination (tiebreaker)" => {
                TeamStatus::NeedsHelpToAvoidElimination
            }
            "Status Unknown" => TeamStatus::Unknown,
            _ => {
                let count = |prefix: &str, suffix: &str| {
                    s.strip_prefix(prefix)
                        .and_then(|rest| rest.strip_suffix(suffix))
                        .and_then(|n| n.parse::<u32>().ok())
                };
                if let Some(wins_to_clinch) = count(NEEDS_PREFIX, NEEDS_SUFFIX) {
                    TeamStatus::InContention { wins_to_clinch }
                } else if let Some(losses_to_elimination) = count(BRINK_PREFIX, BRINK_SUFFIX) {
                    TeamStatus::OnTheBrink {
                        losses_to_elimination,
                    }
                } else {
                    return Err(ParseStatusError(s.to_string()));
                }
            }
        };
        Ok(status)
    }
}

impl Serialize for TeamStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TeamStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

/// One team's line in the standings.
///
/// Teams are plain values: the simulator never mutates a team in place, it
/// builds a new record with [`Team::with_result`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique within a league
    pub name: String,

    pub wins: u32,

    pub losses: u32,

    /// Tiebreak metric
    pub points_for: f64,

    /// Dense rank, 1 = first place (0 until ranked)
    #[serde(default)]
    pub rank: u32,

    /// Wins (plus losses by the first team out) needed to clinch
    #[serde(default, rename = "clinch_MN", alias = "clinch_magic_number")]
    pub clinch_magic_number: Option<u32>,

    /// Losses before mathematical elimination
    #[serde(default, rename = "elim_MN", alias = "elimination_number")]
    pub elimination_number: Option<u32>,

    #[serde(default)]
    pub status: TeamStatus,
}

impl Team {
    pub fn new(name: impl Into<String>, wins: u32, losses: u32, points_for: f64) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            points_for,
            rank: 0,
            clinch_magic_number: None,
            elimination_number: None,
            status: TeamStatus::Unknown,
        }
    }

    /// A copy of this team with one more win or loss on its record.
    pub fn with_result(&self, won: bool) -> Self {
        let mut next = self.clone();
        if won {
            next.wins += 1;
        } else {
            next.losses += 1;
        }
        next
    }

    /// Record formatted as `W-L`.
    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }

    /// Standings order: more wins first, then fewer losses, then more points.
    pub fn standings_cmp(&self, other: &Team) -> Ordering {
        other
            .wins
            .cmp(&self.wins)
            .then_with(|| self.losses.cmp(&other.losses))
            .then_with(|| other.points_for.total_cmp(&self.points_for))
    }
}
