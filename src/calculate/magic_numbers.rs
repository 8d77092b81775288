//! Clinch magic numbers, elimination numbers and status labels.

use tracing::warn;

use crate::models::{SeasonParameters, Team, TeamStatus};

/// The two teams that define the playoff line.
#[derive(Debug, Clone, Copy)]
struct Boundary<'a> {
    /// Team at rank `playoff_spots`
    first_in: &'a Team,
    /// First team below the cutoff with strictly fewer wins than `first_in`
    first_out: Option<&'a Team>,
}

fn find_boundary(ranked: &[Team], playoff_spots: usize) -> Option<Boundary<'_>> {
    let first_in = ranked.get(playoff_spots.checked_sub(1)?)?;
    let first_out = ranked[playoff_spots..]
        .iter()
        .find(|t| t.wins < first_in.wins);
    Some(Boundary {
        first_in,
        first_out,
    })
}

fn floor_at_zero(n: i64) -> u32 {
    n.max(0) as u32
}

/// Fill in clinch and elimination numbers on ranked teams.
///
/// Teams at or above the cutoff, and teams below it that are tied in wins with
/// the team at the cutoff, get a clinch number; everyone else gets an
/// elimination number. When every team below the cutoff is tied with it there
/// is no first team out, and the clinch numbers stay empty.
pub fn assign_magic_numbers(ranked: Vec<Team>, season: &SeasonParameters) -> Vec<Team> {
    let Some(boundary) = find_boundary(&ranked, season.playoff_spots) else {
        warn!(
            "Playoff cutoff {} is outside standings of {} teams",
            season.playoff_spots,
            ranked.len()
        );
        return ranked
            .iter()
            .cloned()
            .map(|mut t| {
                t.clinch_magic_number = None;
                t.elimination_number = None;
                t
            })
            .collect();
    };

    if boundary.first_out.is_none() {
        warn!(
            "No team below the cutoff trails {} in wins; clinch numbers unresolved",
            boundary.first_in.name
        );
    }

    let total_weeks = season.total_weeks as i64;
    let remaining = season.remaining_weeks() as i64;
    let cutoff_wins = boundary.first_in.wins;
    let first_out_losses = boundary.first_out.map(|t| t.losses as i64);

    ranked
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let mut team = team.clone();
            let wins = team.wins as i64;
            if i < season.playoff_spots || team.wins == cutoff_wins {
                team.clinch_magic_number =
                    first_out_losses.map(|losses| floor_at_zero(total_weeks + 1 - wins - losses));
                team.elimination_number = None;
            } else {
                let deficit = cutoff_wins as i64 - wins;
                team.clinch_magic_number = None;
                team.elimination_number = Some(floor_at_zero(remaining - deficit + 1));
            }
            team
        })
        .collect()
}

/// Status for one team given its magic numbers.
pub fn derive_status(team: &Team, remaining_weeks: u32) -> TeamStatus {
    let clinch = team.clinch_magic_number;
    let elim = team.elimination_number;

    match (clinch, elim) {
        (None, None) => TeamStatus::Unknown,
        (Some(0), _) => TeamStatus::Clinched,
        (_, Some(0)) => TeamStatus::Eliminated,
        _ if remaining_weeks == 0 => TeamStatus::Bubble,
        (Some(n), _) if n > remaining_weeks => TeamStatus::NeedsHelpToClinch,
        (_, Some(n)) if n > remaining_weeks => TeamStatus::NeedsHelpToAvoidElimination,
        (Some(n), _) => TeamStatus::InContention { wins_to_clinch: n },
        (_, Some(n)) => TeamStatus::OnTheBrink {
            losses_to_elimination: n,
        },
    }
}

/// Set every team's status from its magic numbers.
pub fn assign_statuses(teams: Vec<Team>, remaining_weeks: u32) -> Vec<Team> {
    teams
        .into_iter()
        .map(|mut t| {
            t.status = derive_status(&t, remaining_weeks);
            t
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::rank_teams;

    fn ranked(records: &[(&str, u32, u32)]) -> Vec<Team> {
        rank_teams(
            records
                .iter()
                .enumerate()
                .map(|(i, &(name, w, l))| Team::new(name, w, l, 1000.0 - i as f64))
                .collect(),
        )
    }

    fn by_name<'a>(teams: &'a [Team], name: &str) -> &'a Team {
        teams.iter().find(|t| t.name == name).unwrap()
    }

    #[test]
    fn test_four_team_numbers() {
        let season = SeasonParameters::new(2, 10, 9);
        let teams = assign_magic_numbers(
            ranked(&[("A", 8, 1), ("B", 7, 2), ("C", 6, 3), ("D", 5, 4)]),
            &season,
        );

        // first in = B (7 wins), first out = C (3 losses)
        assert_eq!(by_name(&teams, "A").clinch_magic_number, Some(0));
        assert_eq!(by_name(&teams, "B").clinch_magic_number, Some(1));
        assert_eq!(by_name(&teams, "C").elimination_number, Some(1));
        assert_eq!(by_name(&teams, "D").elimination_number, Some(0));
        assert_eq!(by_name(&teams, "A").elimination_number, None);
        assert_eq!(by_name(&teams, "D").clinch_magic_number, None);
    }

    #[test]
    fn test_tied_with_cutoff_gets_clinch_number() {
        let season = SeasonParameters::new(2, 14, 10);
        let teams = assign_magic_numbers(
            ranked(&[("A", 8, 2), ("B", 6, 4), ("C", 6, 4), ("D", 3, 7)]),
            &season,
        );

        let c = by_name(&teams, "C");
        assert_eq!(c.rank, 3);
        assert!(c.clinch_magic_number.is_some());
        assert_eq!(c.elimination_number, None);
        // 14 + 1 - 6 - 7
        assert_eq!(c.clinch_magic_number, Some(2));
    }

    #[test]
    fn test_numbers_floor_at_zero() {
        let season = SeasonParameters::new(1, 10, 9);
        let teams = assign_magic_numbers(ranked(&[("A", 9, 0), ("B", 2, 7)]), &season);
        // 10 + 1 - 9 - 7 = -5, 1 - 7 + 1 = -5
        assert_eq!(by_name(&teams, "A").clinch_magic_number, Some(0));
        assert_eq!(by_name(&teams, "B").elimination_number, Some(0));
    }

    #[test]
    fn test_unresolved_boundary_leaves_numbers_empty() {
        let season = SeasonParameters::new(1, 10, 5);
        let teams = assign_magic_numbers(
            ranked(&[("A", 3, 2), ("B", 3, 2), ("C", 3, 2), ("D", 3, 2)]),
            &season,
        );

        for team in &teams {
            assert_eq!(team.clinch_magic_number, None);
            assert_eq!(team.elimination_number, None);
        }
        let teams = assign_statuses(teams, season.remaining_weeks());
        assert!(teams.iter().all(|t| t.status == TeamStatus::Unknown));
    }

    #[test]
    fn test_cutoff_out_of_range_tolerated() {
        let season = SeasonParameters::new(0, 10, 5);
        let teams = assign_magic_numbers(ranked(&[("A", 3, 2), ("B", 2, 3)]), &season);
        assert!(teams
            .iter()
            .all(|t| t.clinch_magic_number.is_none() && t.elimination_number.is_none()));
    }

    fn with_numbers(clinch: Option<u32>, elim: Option<u32>) -> Team {
        let mut t = Team::new("T", 0, 0, 0.0);
        t.clinch_magic_number = clinch;
        t.elimination_number = elim;
        t
    }

    #[test]
    fn test_status_priority() {
        assert_eq!(derive_status(&with_numbers(Some(0), None), 3), TeamStatus::Clinched);
        assert_eq!(derive_status(&with_numbers(None, Some(0)), 3), TeamStatus::Eliminated);
        assert_eq!(derive_status(&with_numbers(Some(2), None), 0), TeamStatus::Bubble);
        assert_eq!(derive_status(&with_numbers(None, Some(1)), 0), TeamStatus::Bubble);
        assert_eq!(
            derive_status(&with_numbers(Some(4), None), 3),
            TeamStatus::NeedsHelpToClinch
        );
        assert_eq!(
            derive_status(&with_numbers(None, Some(4)), 3),
            TeamStatus::NeedsHelpToAvoidElimination
        );
        assert_eq!(
            derive_status(&with_numbers(Some(3), None), 3),
            TeamStatus::InContention { wins_to_clinch: 3 }
        );
        assert_eq!(
            derive_status(&with_numbers(None, Some(2)), 3),
            TeamStatus::OnTheBrink {
                losses_to_elimination: 2
            }
        );
        assert_eq!(derive_status(&with_numbers(None, None), 0), TeamStatus::Unknown);
    }
}
