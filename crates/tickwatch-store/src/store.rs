//! Baseline snapshot persistence.
//!
//! The store exclusively owns the persisted baseline file. `save` must run
//! exactly once per run, after diffing completes; writing goes through a
//! sibling temp file and an atomic rename so a crash mid-write never leaves a
//! half-written baseline for the next run to trip over.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use tickwatch_core::{Listing, ObservationDate, Snapshot, SnapshotBuilder, Symbol};

use crate::StoreError;

/// One serialized snapshot row. The store owns this file shape; nothing else
/// reads or writes the baseline.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SnapshotRow {
    pub symbol: String,
    pub company_name: String,
    pub exchange: String,
    pub fetched_on: String,
}

impl From<&Listing> for SnapshotRow {
    fn from(listing: &Listing) -> Self {
        Self {
            symbol: listing.symbol.as_str().to_owned(),
            company_name: listing.company_name.clone(),
            exchange: listing.exchange.clone(),
            fetched_on: listing.fetched_on.format_iso(),
        }
    }
}

/// Loads and overwrites the comparison baseline.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last-persisted baseline.
    ///
    /// Returns `Ok(None)` when no baseline exists yet — the expected
    /// cold-start state, not a failure. An existing baseline that fails to
    /// parse is [`StoreError::FatalRead`]; there is no partial fallback.
    pub fn load_previous(&self) -> Result<Option<Snapshot>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no baseline yet, cold start");
            return Ok(None);
        }

        let snapshot = read_snapshot_file(&self.path)?;
        debug!(
            path = %self.path.display(),
            rows = snapshot.len(),
            "loaded baseline snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Overwrite the baseline with `snapshot`, unconditionally.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let staging = self.path.with_extension("csv.tmp");
        write_snapshot_rows(&staging, snapshot)?;
        fs::rename(&staging, &self.path)?;
        debug!(
            path = %self.path.display(),
            rows = snapshot.len(),
            "baseline snapshot saved"
        );
        Ok(())
    }
}

pub(crate) fn write_snapshot_rows(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for listing in snapshot.iter() {
        writer.serialize(SnapshotRow::from(listing))?;
    }
    writer.flush().map_err(StoreError::from)?;
    Ok(())
}

/// Parse a snapshot file into unique-keyed listings.
///
/// Any unreadable row, invalid field, or duplicate symbol makes the whole
/// file [`StoreError::FatalRead`].
pub fn read_snapshot_file(path: &Path) -> Result<Snapshot, StoreError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|error| StoreError::fatal_read(path, error.to_string()))?;

    let mut builder = SnapshotBuilder::new();
    for (offset, row) in reader.deserialize::<SnapshotRow>().enumerate() {
        let row_number = offset + 2;
        let row = row.map_err(|error| {
            StoreError::fatal_read(path, format!("row {row_number}: {error}"))
        })?;

        let symbol = Symbol::parse(&row.symbol).map_err(|error| {
            StoreError::fatal_read(path, format!("row {row_number}: {error}"))
        })?;
        let fetched_on = ObservationDate::parse(&row.fetched_on).map_err(|error| {
            StoreError::fatal_read(path, format!("row {row_number}: {error}"))
        })?;
        let listing = Listing::new(symbol, row.company_name, row.exchange, fetched_on)
            .map_err(|error| {
                StoreError::fatal_read(path, format!("row {row_number}: {error}"))
            })?;

        let symbol_text = listing.symbol.as_str().to_owned();
        if !builder.push(listing) {
            return Err(StoreError::fatal_read(
                path,
                format!("row {row_number}: duplicate symbol '{symbol_text}'"),
            ));
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn listing(symbol: &str, name: &str, exchange: &str) -> Listing {
        Listing::new(
            Symbol::parse(symbol).expect("valid symbol"),
            name,
            exchange,
            ObservationDate::parse("2026-08-08").expect("valid date"),
        )
        .expect("listing should build")
    }

    #[test]
    fn missing_baseline_is_cold_start_not_error() {
        let temp = tempdir().expect("tempdir");
        let store = SnapshotStore::new(temp.path().join("baseline.csv"));

        let loaded = store.load_previous().expect("load should succeed");
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_round_trips_listings_in_order() {
        let temp = tempdir().expect("tempdir");
        let store = SnapshotStore::new(temp.path().join("baseline.csv"));

        let snapshot = Snapshot::from_listings([
            listing("MSFT", "Microsoft Corporation", "NASDAQ"),
            listing("A", "Agilent Technologies, Inc.", "NYSE"),
        ]);
        store.save(&snapshot).expect("save should succeed");

        let loaded = store
            .load_previous()
            .expect("load should succeed")
            .expect("baseline present");
        assert_eq!(loaded, snapshot);
        let symbols: Vec<&str> = loaded.iter().map(|l| l.symbol.as_str()).collect();
        assert_eq!(symbols, ["MSFT", "A"]);
    }

    #[test]
    fn save_overwrites_prior_baseline() {
        let temp = tempdir().expect("tempdir");
        let store = SnapshotStore::new(temp.path().join("baseline.csv"));

        store
            .save(&Snapshot::from_listings([listing("OLD", "Old Corp", "NYSE")]))
            .expect("first save");
        store
            .save(&Snapshot::from_listings([listing("NEW", "New Corp", "NASDAQ")]))
            .expect("second save");

        let loaded = store
            .load_previous()
            .expect("load should succeed")
            .expect("baseline present");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.iter().next().expect("one row").symbol.as_str(), "NEW");
    }

    #[test]
    fn malformed_baseline_is_a_fatal_read() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("baseline.csv");
        fs::write(
            &path,
            "symbol,company_name,exchange,fetched_on\nAAPL,Apple Inc.,NASDAQ,not-a-date\n",
        )
        .expect("write fixture");

        let err = SnapshotStore::new(&path)
            .load_previous()
            .expect_err("must fail");
        assert!(matches!(err, StoreError::FatalRead { .. }));
    }

    #[test]
    fn duplicate_symbol_in_baseline_is_a_fatal_read() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("baseline.csv");
        fs::write(
            &path,
            "symbol,company_name,exchange,fetched_on\n\
             AAPL,Apple Inc.,NASDAQ,2026-08-08\n\
             AAPL,Apple Computer,NYSE,2026-08-08\n",
        )
        .expect("write fixture");

        let err = SnapshotStore::new(&path)
            .load_previous()
            .expect_err("must fail");
        match err {
            StoreError::FatalRead { reason, .. } => assert!(reason.contains("duplicate symbol")),
            other => panic!("expected FatalRead, got {other:?}"),
        }
    }

    #[test]
    fn quoted_company_names_survive_the_round_trip() {
        let temp = tempdir().expect("tempdir");
        let store = SnapshotStore::new(temp.path().join("baseline.csv"));

        let snapshot =
            Snapshot::from_listings([listing("A", "Agilent Technologies, Inc.", "NYSE")]);
        store.save(&snapshot).expect("save should succeed");

        let loaded = store
            .load_previous()
            .expect("load should succeed")
            .expect("baseline present");
        assert_eq!(
            loaded.iter().next().expect("one row").company_name,
            "Agilent Technologies, Inc."
        );
    }
}
