//! # Tickwatch Store
//!
//! Persistence layer for the Tickwatch listing tracker: the comparison
//! baseline, the append-only change history, and the per-run report files.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`store`] | Baseline snapshot load/save ([`SnapshotStore`]) |
//! | [`history`] | Append-only run summaries ([`HistoryLog`]) |
//! | [`reports`] | Dated CSV/JSONL report files ([`ReportWriter`]) |
//! | [`error`] | Persistence error taxonomy ([`StoreError`]) |
//!
//! The store is the only owner of the baseline file. A missing baseline is
//! the expected cold-start state (`Ok(None)`); a baseline that exists but
//! cannot be parsed is fatal, because diffing against corrupt state would
//! silently misreport listing churn.
//!
//! All file locations are explicit constructor arguments; this crate keeps no
//! process-wide path defaults.

pub mod error;
pub mod history;
pub mod reports;
pub mod store;

pub use error::StoreError;
pub use history::HistoryLog;
pub use reports::ReportWriter;
pub use store::{read_snapshot_file, SnapshotStore};
