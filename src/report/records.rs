//! Season records from completed-week scores.
//!
//! - All-play: every team measured against every other team's score each week.
//! - Schedule swap: a team's record had it faced another team's opponents.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

use crate::models::WeekResult;

/// Wins, losses and ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordLine {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl RecordLine {
    fn record(&mut self, score: f64, other: f64) {
        if score > other {
            self.wins += 1;
        } else if score < other {
            self.losses += 1;
        } else {
            self.ties += 1;
        }
    }
}

impl AddAssign for RecordLine {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.losses += rhs.losses;
        self.ties += rhs.ties;
    }
}

impl fmt::Display for RecordLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ties == 0 {
            write!(f, "{}-{}", self.wins, self.losses)
        } else {
            write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
        }
    }
}

/// One team's all-play record, week by week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllPlayRecord {
    pub team: String,
    pub weeks: Vec<(u32, RecordLine)>,
    pub total: RecordLine,
}

/// `table[team][other]` is `team`'s record against `other`'s schedule.
pub type ScheduleSwapTable = BTreeMap<String, BTreeMap<String, RecordLine>>;

fn team_names(results: &[WeekResult]) -> BTreeSet<&str> {
    results
        .iter()
        .flat_map(|w| &w.games)
        .flat_map(|g| [g.home.as_str(), g.away.as_str()])
        .collect()
}

/// All-play records sorted by total wins, most first.
pub fn all_play_records(results: &[WeekResult]) -> Vec<AllPlayRecord> {
    let names = team_names(results);

    let mut records: Vec<AllPlayRecord> = names
        .iter()
        .map(|&team| {
            let weeks: Vec<(u32, RecordLine)> = results
                .iter()
                .filter_map(|week| {
                    let (score, _) = week.score_of(team)?;
                    let mut line = RecordLine::default();
                    for game in &week.games {
                        for (other, other_score) in
                            [(&game.home, game.home_score), (&game.away, game.away_score)]
                        {
                            if other != team {
                                line.record(score, other_score);
                            }
                        }
                    }
                    Some((week.week, line))
                })
                .collect();

            let mut total = RecordLine::default();
            for (_, line) in &weeks {
                total += *line;
            }

            AllPlayRecord {
                team: team.to_string(),
                weeks,
                total,
            }
        })
        .collect();

    records.sort_by(|a, b| b.total.wins.cmp(&a.total.wins));
    records
}

/// Every team's record against every other team's schedule.
///
/// In a week where the other team's opponent was the team itself, the team is
/// compared against the other team's score instead.
pub fn schedule_swap_records(results: &[WeekResult]) -> ScheduleSwapTable {
    let names = team_names(results);
    let mut table = ScheduleSwapTable::new();

    for &team in &names {
        let row = table.entry(team.to_string()).or_default();
        for &other in names.iter().filter(|&&o| o != team) {
            let mut line = RecordLine::default();
            for week in results {
                let Some((score, _)) = week.score_of(team) else {
                    continue;
                };
                let Some((other_score, opponent)) = week.score_of(other) else {
                    continue;
                };
                let faced = if opponent == team {
                    Some(other_score)
                } else {
                    week.score_of(opponent).map(|(s, _)| s)
                };
                if let Some(faced) = faced {
                    line.record(score, faced);
                }
            }
            row.insert(other.to_string(), line);
        }
    }

    table
}

/// Weekly columns plus a total, one row per team.
pub fn render_all_play(records: &[AllPlayRecord]) -> String {
    let weeks: BTreeSet<u32> = records
        .iter()
        .flat_map(|r| r.weeks.iter().map(|(w, _)| *w))
        .collect();
    let width = records.iter().map(|r| r.team.len()).max().unwrap_or(4).max(4);

    let mut header = format!("{:<width$}", "Team", width = width);
    for week in &weeks {
        header.push_str(&format!(" {:>7}", format!("Wk {}", week)));
    }
    header.push_str(&format!(" {:>7}", "Total"));

    let mut out = vec![header];
    for record in records {
        let mut row = format!("{:<width$}", record.team, width = width);
        for week in &weeks {
            let cell = record
                .weeks
                .iter()
                .find(|(w, _)| w == week)
                .map(|(_, line)| line.to_string())
                .unwrap_or_else(|| "-".to_string());
            row.push_str(&format!(" {:>7}", cell));
        }
        row.push_str(&format!(" {:>7}", record.total.to_string()));
        out.push(row);
    }
    out.join("\n")
}

/// One block per team listing its record against each other schedule.
pub fn render_schedule_swap(table: &ScheduleSwapTable) -> String {
    let mut out = Vec::new();
    for (team, row) in table {
        out.push(format!("{} against the schedule of:", team));
        for (other, line) in row {
            out.push(format!("  {:<24} {}", other, line));
        }
    }
    out.join("\n")
}
