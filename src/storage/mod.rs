//! Filesystem operations.
//!
//! - League snapshot JSON input
//! - Pretty JSON report output
//! - JSONL history of scenario runs

pub mod history;
pub mod json;

pub use history::{RunHistory, RunRecord};
pub use json::{read_league_snapshot, write_json};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join("history")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_dir().join("scenario_runs.jsonl")
    }

    /// Where the JSON report for a run is written.
    pub fn report_path(&self, run_id: &str) -> PathBuf {
        self.reports_dir().join(format!("{}.json", run_id))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
