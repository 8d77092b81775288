//! Standings calculation.
//!
//! - Ranking teams by record and points for
//! - Clinch magic numbers and elimination numbers around the playoff line
//! - Status labels derived from those numbers
//!
//! Everything here is pure: the scenario simulator calls it once per
//! hypothetical outcome.

mod magic_numbers;
mod ranking;

pub use magic_numbers::{assign_magic_numbers, assign_statuses, derive_status};
pub use ranking::rank_teams;

use crate::models::{SeasonParameters, Standings, Team};

/// Rank teams, then annotate them with magic numbers and status.
pub fn compute_standings(teams: Vec<Team>, season: SeasonParameters) -> Standings {
    let ranked = rank_teams(teams);
    let numbered = assign_magic_numbers(ranked, &season);
    let teams = assign_statuses(numbered, season.remaining_weeks());
    Standings { season, teams }
}
