//! Standings ranker.

use crate::models::Team;

/// Sort teams into standings order and assign dense ranks 1..N.
///
/// Order is wins descending, losses ascending, points-for descending. There is
/// no further tiebreaker: teams with identical keys keep their input order
/// (the sort is stable).
pub fn rank_teams(mut teams: Vec<Team>) -> Vec<Team> {
    teams.sort_by(|a, b| a.standings_cmp(b));
    for (i, team) in teams.iter_mut().enumerate() {
        team.rank = i as u32 + 1;
    }
    teams
}
