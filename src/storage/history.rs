//! JSONL history of scenario runs.
//!
//! Each line is one [`RunRecord`]. The file is append-only; a re-run of the
//! same league week appends a new line with the same id.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};
use crate::models::RunId;
use crate::scenario::ScenarioReport;

/// Summary of one saved scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: RunId,
    pub league: String,
    pub week: u32,
    pub created_at: DateTime<Utc>,
    pub matchups: usize,
    pub permutations: usize,

    /// Teams with at least one clinching permutation
    #[serde(default)]
    pub can_clinch: Vec<String>,

    /// Teams with at least one eliminating permutation
    #[serde(default)]
    pub can_be_eliminated: Vec<String>,
}

impl RunRecord {
    pub fn from_report(report: &ScenarioReport, created_at: DateTime<Utc>) -> Self {
        let mut can_clinch = Vec::new();
        let mut can_be_eliminated = Vec::new();
        for (team, buckets) in &report.buckets {
            if !buckets.clinched_in.is_empty() {
                can_clinch.push(team.clone());
            }
            if !buckets.eliminated_in.is_empty() {
                can_be_eliminated.push(team.clone());
            }
        }

        Self {
            id: report.run_id.clone(),
            league: report.league.clone(),
            week: report.standings.season.current_week,
            created_at,
            matchups: report.schedule.len(),
            permutations: report.permutation_count,
            can_clinch,
            can_be_eliminated,
        }
    }
}

/// Append-only run log.
pub struct RunHistory {
    path: PathBuf,
}

impl RunHistory {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn for_config(config: &StorageConfig) -> Self {
        Self::new(config.history_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one record.
    pub fn append(&self, record: &RunRecord) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", serde_json::to_string(record)?)?;
        writer.flush()?;

        debug!("Appended run {} to {:?}", record.id, self.path);
        Ok(())
    }

    /// Every parsable record, oldest first. A missing file is an empty history.
    pub fn read_all(&self) -> Result<Vec<RunRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        Ok(records)
    }

    /// The newest `limit` records, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<RunRecord>, StorageError> {
        let mut records = self.read_all()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }
}
