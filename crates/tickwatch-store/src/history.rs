//! Append-only change-summary history.
//!
//! One CSV line per run. Lines are never rewritten once appended; the header
//! is written only when the file is first created.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::debug;

use tickwatch_core::ChangeSummary;

use crate::StoreError;

#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one summary line, creating the file (with header) on first use.
    pub fn append(&self, summary: &ChangeSummary) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(!exists)
            .from_writer(file);
        writer.serialize(summary)?;
        writer.flush().map_err(StoreError::from)?;

        debug!(path = %self.path.display(), observed_on = %summary.observed_on, "history line appended");
        Ok(())
    }

    /// Read every appended summary, oldest first.
    ///
    /// A missing file is an empty history, not an error.
    pub fn read_all(&self) -> Result<Vec<ChangeSummary>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut entries = Vec::new();
        for row in reader.deserialize::<ChangeSummary>() {
            entries.push(row?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tickwatch_core::ObservationDate;

    fn summary(date: &str, new: usize) -> ChangeSummary {
        let mut summary =
            ChangeSummary::empty(ObservationDate::parse(date).expect("valid date"), 100);
        summary.new = new;
        summary
    }

    #[test]
    fn empty_history_reads_as_no_entries() {
        let temp = tempdir().expect("tempdir");
        let log = HistoryLog::new(temp.path().join("history.csv"));
        assert!(log.read_all().expect("read should succeed").is_empty());
    }

    #[test]
    fn appends_accumulate_oldest_first() {
        let temp = tempdir().expect("tempdir");
        let log = HistoryLog::new(temp.path().join("history.csv"));

        log.append(&summary("2026-08-07", 12)).expect("first append");
        log.append(&summary("2026-08-08", 3)).expect("second append");

        let entries = log.read_all().expect("read should succeed");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].observed_on.format_iso(), "2026-08-07");
        assert_eq!(entries[0].new, 12);
        assert_eq!(entries[1].observed_on.format_iso(), "2026-08-08");
    }

    #[test]
    fn header_is_written_exactly_once() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("history.csv");
        let log = HistoryLog::new(&path);

        log.append(&summary("2026-08-07", 1)).expect("first append");
        log.append(&summary("2026-08-08", 2)).expect("second append");

        let text = fs::read_to_string(&path).expect("read file");
        let header_lines = text
            .lines()
            .filter(|line| line.starts_with("observed_on"))
            .count();
        assert_eq!(header_lines, 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn earlier_lines_survive_later_appends() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("history.csv");
        let log = HistoryLog::new(&path);

        log.append(&summary("2026-08-07", 1)).expect("first append");
        let before = fs::read_to_string(&path).expect("read file");
        log.append(&summary("2026-08-08", 2)).expect("second append");
        let after = fs::read_to_string(&path).expect("read file");

        assert!(after.starts_with(&before));
    }
}
