//! Dated report files derived from one run.
//!
//! Reports are plain serializations of the engine's output structures; they
//! carry no state of their own and are safe to regenerate.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use tickwatch_core::{ChangeRecord, ObservationDate, Snapshot};

use crate::store::SnapshotRow;
use crate::StoreError;

/// Writes the per-run master, diff, and JSONL reports under one directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full current listing set, dated: `listings_<date>.csv`.
    pub fn write_master_csv(
        &self,
        snapshot: &Snapshot,
        observed_on: ObservationDate,
    ) -> Result<PathBuf, StoreError> {
        let path = self.dated_path("listings", observed_on, "csv");
        self.ensure_dir()?;
        let mut writer = csv::Writer::from_path(&path)?;
        for listing in snapshot.iter() {
            writer.serialize(SnapshotRow::from(listing))?;
        }
        writer.flush().map_err(StoreError::from)?;
        debug!(path = %path.display(), rows = snapshot.len(), "master list written");
        Ok(path)
    }

    /// Classified change records, dated: `listing_changes_<date>.csv`.
    ///
    /// Written even when empty so a quiet day still leaves evidence the run
    /// happened.
    pub fn write_diff_csv(
        &self,
        records: &[ChangeRecord],
        observed_on: ObservationDate,
    ) -> Result<PathBuf, StoreError> {
        let path = self.dated_path("listing_changes", observed_on, "csv");
        self.ensure_dir()?;
        let mut writer = csv::Writer::from_path(&path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(StoreError::from)?;
        debug!(path = %path.display(), rows = records.len(), "diff report written");
        Ok(path)
    }

    /// Latest listing set as JSONL for downstream consumers.
    pub fn write_snapshot_jsonl(&self, snapshot: &Snapshot) -> Result<PathBuf, StoreError> {
        let path = self.dir.join("listings_latest.jsonl");
        self.ensure_dir()?;
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        for listing in snapshot.iter() {
            let line = serde_json::to_string(listing)?;
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = snapshot.len(), "jsonl export written");
        Ok(path)
    }

    fn dated_path(&self, stem: &str, observed_on: ObservationDate, extension: &str) -> PathBuf {
        self.dir
            .join(format!("{stem}_{}.{extension}", observed_on.format_iso()))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}
