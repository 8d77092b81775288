//! Whole-document JSON reads and writes.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use super::StorageError;
use crate::models::LeagueSnapshot;

/// Load a league snapshot document.
pub fn read_league_snapshot(path: &Path) -> Result<LeagueSnapshot, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let snapshot: LeagueSnapshot = serde_json::from_reader(reader)?;
    debug!(
        "Loaded {} teams and {} matchups from {:?}",
        snapshot.teams.len(),
        snapshot.current_week_matchups.len(),
        path
    );
    Ok(snapshot)
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;

    info!("Wrote {:?}", path);
    Ok(())
}
