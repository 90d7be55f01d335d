//! Listing feed contract and snapshot merging.
//!
//! A feed fetches one upstream listing file and normalizes it into
//! [`Listing`] rows. Feeds never retry; transport failures are classified and
//! propagated for the caller to report.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Listing, ObservationDate, Snapshot, SnapshotBuilder, ValidationError};

/// Canonical feed identifiers used in metadata and envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedId {
    NasdaqListed,
    OtherListed,
    NyseListed,
}

impl FeedId {
    /// Fixed merge precedence: earlier feeds win on duplicate symbols.
    pub const ALL: [Self; 3] = [Self::NasdaqListed, Self::OtherListed, Self::NyseListed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NasdaqListed => "nasdaq_listed",
            Self::OtherListed => "other_listed",
            Self::NyseListed => "nyse_listed",
        }
    }
}

impl Display for FeedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nasdaq_listed" => Ok(Self::NasdaqListed),
            "other_listed" => Ok(Self::OtherListed),
            "nyse_listed" => Ok(Self::NyseListed),
            other => Err(ValidationError::InvalidFeed {
                value: other.to_owned(),
            }),
        }
    }
}

/// Failure fetching or decoding one upstream listing file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("feed transport error: {0}")]
    Transport(String),
    #[error("feed upstream returned status {status}")]
    UpstreamStatus { status: u16 },
    #[error("feed payload malformed: {0}")]
    Malformed(String),
}

impl FeedError {
    pub const fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::UpstreamStatus { .. })
    }
}

/// Normalized output of one feed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedBatch {
    pub feed: FeedId,
    pub listings: Vec<Listing>,
    /// Rows dropped during normalization, with the reason each was dropped.
    pub skipped: Vec<String>,
}

/// Upstream listing source contract.
pub trait ListingFeed: Send + Sync {
    fn id(&self) -> FeedId;

    /// Upstream location, for diagnostics and the `feeds` command.
    fn url(&self) -> &str;

    /// Fetch and normalize the feed, stamping rows with `fetched_on`.
    fn fetch<'a>(
        &'a self,
        fetched_on: ObservationDate,
    ) -> Pin<Box<dyn Future<Output = Result<FeedBatch, FeedError>> + Send + 'a>>;
}

/// Result of merging feed batches into one current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub snapshot: Snapshot,
    /// Rows dropped by the first-seen-wins rule across feeds.
    pub duplicates: usize,
    /// Normalization warnings carried over from the individual batches.
    pub skipped: Vec<String>,
}

/// Merge batches into a snapshot in the order given.
///
/// The caller's batch order is the feed precedence order; a symbol appearing
/// in more than one feed keeps its first occurrence. This runs before the
/// diff engine ever sees the snapshot, upholding its uniqueness invariant.
pub fn merge_batches(batches: Vec<FeedBatch>) -> MergeOutcome {
    let mut builder = SnapshotBuilder::new();
    let mut skipped = Vec::new();

    for batch in batches {
        for message in batch.skipped {
            skipped.push(format!("{}: {message}", batch.feed));
        }
        for listing in batch.listings {
            builder.push(listing);
        }
    }

    let duplicates = builder.duplicates();
    MergeOutcome {
        snapshot: builder.build(),
        duplicates,
        skipped,
    }
}
