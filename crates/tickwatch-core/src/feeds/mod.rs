//! Upstream listing feed adapters.
//!
//! Three feeds cover the US listing universe the way the upstream publishers
//! split it:
//!
//! | Adapter | Upstream file | Format |
//! |---------|---------------|--------|
//! | [`NasdaqListedFeed`] | nasdaqtrader `nasdaqlisted.txt` | pipe-delimited |
//! | [`OtherListedFeed`] | nasdaqtrader `otherlisted.txt` | pipe-delimited |
//! | [`NyseListedFeed`] | datahub `nyse-listed.csv` | comma CSV |
//!
//! Rows that fail symbol or exchange validation are skipped with a recorded
//! reason rather than failing the whole feed; a payload without the expected
//! header columns is malformed and fails hard.

mod nasdaq;
mod nyse;
mod other;

use std::sync::Arc;

use crate::{FeedError, HttpClient, ListingFeed};

pub use nasdaq::{NasdaqListedFeed, NASDAQ_LISTED_URL};
pub use nyse::{NyseListedFeed, NYSE_LISTED_URL};
pub use other::{OtherListedFeed, OTHER_LISTED_URL};

/// All feeds over one shared transport, in merge precedence order.
pub fn default_feeds(http: Arc<dyn HttpClient>, timeout_ms: u64) -> Vec<Box<dyn ListingFeed>> {
    vec![
        Box::new(NasdaqListedFeed::new(Arc::clone(&http)).with_timeout_ms(timeout_ms)),
        Box::new(OtherListedFeed::new(Arc::clone(&http)).with_timeout_ms(timeout_ms)),
        Box::new(NyseListedFeed::new(http).with_timeout_ms(timeout_ms)),
    ]
}

/// Nasdaq Trader symbol directory files end with a `File Creation Time` row.
pub(crate) fn is_creation_trailer(line: &str) -> bool {
    line.starts_with("File Creation Time")
}

pub(crate) fn column_index(header_fields: &[&str], name: &str) -> Result<usize, FeedError> {
    header_fields
        .iter()
        .position(|field| field.trim() == name)
        .ok_or_else(|| FeedError::Malformed(format!("missing '{name}' column in header")))
}
