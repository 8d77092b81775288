//! Scenario descriptions and the standings table.

use crate::models::{MinimalCondition, PathReduction, Schedule, Standings, Team, TeamStatus};
use crate::scenario::ScenarioReport;

/// Which bucket a reduction describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Clinch,
    Elimination,
}

impl ScenarioKind {
    fn verb(self) -> &'static str {
        match self {
            ScenarioKind::Clinch => "clinches",
            ScenarioKind::Elimination => "is eliminated",
        }
    }

    fn regardless(self) -> &'static str {
        match self {
            ScenarioKind::Clinch => "clinched regardless of outcome",
            ScenarioKind::Elimination => "eliminated regardless of outcome",
        }
    }

    fn already(self) -> &'static str {
        match self {
            ScenarioKind::Clinch => "clinched playoff spot",
            ScenarioKind::Elimination => "eliminated from playoffs",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            ScenarioKind::Clinch => "CLINCH SCENARIOS",
            ScenarioKind::Elimination => "ELIMINATION SCENARIOS",
        }
    }
}

/// Other winners a path requires, skipping the team's own slot.
fn other_winners<'a>(
    condition: &'a MinimalCondition,
    own_slot: Option<usize>,
) -> impl Iterator<Item = &'a str> {
    condition
        .required_winners()
        .filter(move |(slot, _)| Some(*slot) != own_slot)
        .map(|(_, winner)| winner)
}

fn clause(
    own_result: Option<&str>,
    condition: &MinimalCondition,
    own_slot: Option<usize>,
) -> String {
    let mut parts: Vec<String> = own_result.map(|r| format!("a {}", r)).into_iter().collect();
    parts.extend(other_winners(condition, own_slot).map(|w| format!("{} WIN", w)));
    if parts.is_empty() {
        "the right combination of other results".to_string()
    } else {
        parts.join(" and ")
    }
}

/// Text lines for one reduction, e.g. `clinches with a WIN and Alpha WIN`
/// followed by `or a LOSS and Beta WIN`.
pub fn describe_reduction(
    team: &str,
    reduction: &PathReduction,
    schedule: &Schedule,
    kind: ScenarioKind,
) -> Vec<String> {
    let (win_path, loss_path) = match reduction {
        PathReduction::Regardless => return vec![kind.regardless().to_string()],
        PathReduction::Paths {
            win_path,
            loss_path,
        } => (win_path, loss_path),
    };

    let own_slot = schedule.slot_of(team);
    let (win_label, loss_label) = if own_slot.is_some() {
        (Some("WIN"), Some("LOSS"))
    } else {
        (None, None)
    };

    let clauses: Vec<String> = [(win_path, win_label), (loss_path, loss_label)]
        .into_iter()
        .filter_map(|(path, label)| path.as_ref().map(|c| clause(label, c, own_slot)))
        .collect();

    clauses
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 {
                format!("{} with {}", kind.verb(), c)
            } else {
                format!("or {}", c)
            }
        })
        .collect()
}

fn push_team_lines(out: &mut Vec<String>, name: &str, lines: &[String]) {
    let indent = " ".repeat(name.len() + 2);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push(format!("{}: {}", name, line));
        } else {
            out.push(format!("{}{}", indent, line));
        }
    }
}

fn section(report: &ScenarioReport, kind: ScenarioKind) -> Vec<String> {
    let mut out = vec![kind.heading().to_string()];
    let decided = match kind {
        ScenarioKind::Clinch => TeamStatus::Clinched,
        ScenarioKind::Elimination => TeamStatus::Eliminated,
    };

    for team in &report.standings.teams {
        let reduction = report.scenarios.get(&team.name).and_then(|s| match kind {
            ScenarioKind::Clinch => s.clinch.as_ref(),
            ScenarioKind::Elimination => s.eliminate.as_ref(),
        });

        if team.status == decided && reduction.is_none() {
            out.push(format!("{}: {}", team.name, kind.already()));
        } else if let Some(reduction) = reduction {
            let lines = describe_reduction(&team.name, reduction, &report.schedule, kind);
            push_team_lines(&mut out, &team.name, &lines);
        }
    }
    out
}

/// Clinch and elimination scenarios for every team, in standings order.
pub fn render_scenarios(report: &ScenarioReport) -> String {
    let mut out = section(report, ScenarioKind::Clinch);
    out.push(String::new());
    out.extend(section(report, ScenarioKind::Elimination));
    out.join("\n")
}

fn number_or_dash(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

fn standings_row(team: &Team) -> String {
    format!(
        "{:>4}  {:<24} {:>6} {:>9.2} {:>6} {:>5}  {}",
        team.rank,
        team.name,
        team.record(),
        team.points_for,
        number_or_dash(team.clinch_magic_number),
        number_or_dash(team.elimination_number),
        team.status
    )
}

/// Ranked standings with magic numbers and status.
pub fn render_standings(standings: &Standings) -> String {
    let mut out = vec![
        format!(
            "Week {} of {} ({} playoff spots, {} week(s) remaining)",
            standings.season.current_week,
            standings.season.total_weeks,
            standings.season.playoff_spots,
            standings.season.remaining_weeks()
        ),
        format!(
            "{:>4}  {:<24} {:>6} {:>9} {:>6} {:>5}  {}",
            "Rank", "Team", "W-L", "PF", "Clinch", "Elim", "Status"
        ),
    ];
    out.extend(standings.teams.iter().map(standings_row));
    out.join("\n")
}

/// One line per team a single result away from clinching or elimination.
pub fn critical_lines(standings: &Standings) -> Vec<String> {
    standings
        .critical_teams()
        .into_iter()
        .map(|t| {
            if t.clinch_magic_number == Some(1) {
                format!("{} clinches with one more win", t.name)
            } else {
                format!("{} is eliminated with one more loss", t.name)
            }
        })
        .collect()
}
