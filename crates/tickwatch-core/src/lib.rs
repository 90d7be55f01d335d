//! # Tickwatch Core
//!
//! Domain contracts and the change-classification engine for the Tickwatch
//! listing tracker.
//!
//! ## Overview
//!
//! This crate provides the foundational components for Tickwatch:
//!
//! - **Canonical domain models** for listings, snapshots, and change records
//! - **A pure diff engine** classifying New / Delisted / Renamed /
//!   Exchange Changed transitions between two snapshots
//! - **Listing feed adapters** for the upstream symbol directories
//! - **An HTTP client abstraction** so feeds are testable offline
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`diff`] | Snapshot diffing and change classification |
//! | [`domain`] | Domain models (Listing, ChangeRecord, Symbol, dates) |
//! | [`error`] | Validation error types |
//! | [`feed`] | Listing feed trait, feed identifiers, batch merging |
//! | [`feeds`] | Feed adapters (Nasdaq, other-listed, NYSE) |
//! | [`http_client`] | HTTP client abstraction |
//! | [`snapshot`] | Symbol-keyed snapshots with uniqueness enforcement |
//!
//! ## Quick Start
//!
//! ```rust
//! use tickwatch_core::{compute_diff, Listing, ObservationDate, Snapshot, Symbol};
//!
//! fn main() -> Result<(), tickwatch_core::ValidationError> {
//!     let observed_on = ObservationDate::parse("2026-08-08")?;
//!     let previous = Snapshot::from_listings([Listing::new(
//!         Symbol::parse("GE")?,
//!         "General Electric",
//!         "NYSE",
//!         observed_on,
//!     )?]);
//!     let current = Snapshot::from_listings([Listing::new(
//!         Symbol::parse("GE")?,
//!         "GE Aerospace",
//!         "NYSE",
//!         observed_on,
//!     )?]);
//!
//!     let report = compute_diff(Some(&previous), &current, observed_on);
//!     assert_eq!(report.summary.renamed, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Determinism
//!
//! The engine performs no I/O and holds no state: identical `(previous,
//! current)` inputs always yield identical records and counters. The
//! observation date is an opaque caller-supplied tag, never generated here.

pub mod diff;
pub mod domain;
pub mod error;
pub mod feed;
pub mod feeds;
pub mod http_client;
pub mod snapshot;

// Re-export commonly used types at crate root for convenience

// Diff engine
pub use diff::{classify, compute_diff, DiffReport};

// Domain models
pub use domain::{ChangeRecord, ChangeStatus, ChangeSummary, Listing, ObservationDate, Symbol};

// Error types
pub use error::ValidationError;

// Feed contract and merging
pub use feed::{merge_batches, FeedBatch, FeedError, FeedId, ListingFeed, MergeOutcome};

// Feed adapters
pub use feeds::{
    default_feeds, NasdaqListedFeed, NyseListedFeed, OtherListedFeed, NASDAQ_LISTED_URL,
    NYSE_LISTED_URL, OTHER_LISTED_URL,
};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Snapshots
pub use snapshot::{Snapshot, SnapshotBuilder};
