use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::{column_index, is_creation_trailer};
use crate::feed::{FeedBatch, FeedError, FeedId, ListingFeed};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{Listing, ObservationDate, Symbol};

pub const NASDAQ_LISTED_URL: &str =
    "https://www.nasdaqtrader.com/dynamic/symdir/nasdaqlisted.txt";

const EXCHANGE: &str = "NASDAQ";

/// Nasdaq-listed securities from the Nasdaq Trader symbol directory.
pub struct NasdaqListedFeed {
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl NasdaqListedFeed {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl ListingFeed for NasdaqListedFeed {
    fn id(&self) -> FeedId {
        FeedId::NasdaqListed
    }

    fn url(&self) -> &str {
        NASDAQ_LISTED_URL
    }

    fn fetch<'a>(
        &'a self,
        fetched_on: ObservationDate,
    ) -> Pin<Box<dyn Future<Output = Result<FeedBatch, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(NASDAQ_LISTED_URL).with_timeout_ms(self.timeout_ms);
            let response = self
                .http
                .execute(request)
                .await
                .map_err(|error| FeedError::Transport(error.message().to_owned()))?;
            if !response.is_success() {
                return Err(FeedError::UpstreamStatus {
                    status: response.status,
                });
            }

            let (listings, skipped) = parse_nasdaq_listed(&response.body, fetched_on)?;
            Ok(FeedBatch {
                feed: FeedId::NasdaqListed,
                listings,
                skipped,
            })
        })
    }
}

fn parse_nasdaq_listed(
    body: &str,
    fetched_on: ObservationDate,
) -> Result<(Vec<Listing>, Vec<String>), FeedError> {
    let mut lines = body.lines();
    let header = lines
        .next()
        .ok_or_else(|| FeedError::Malformed(String::from("empty payload")))?;
    let header_fields: Vec<&str> = header.split('|').collect();
    let symbol_at = column_index(&header_fields, "Symbol")?;
    let name_at = column_index(&header_fields, "Security Name")?;
    let width = symbol_at.max(name_at) + 1;

    let mut listings = Vec::new();
    let mut skipped = Vec::new();
    for (offset, line) in lines.enumerate() {
        let row_number = offset + 2;
        if line.trim().is_empty() || is_creation_trailer(line) {
            continue;
        }

        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < width {
            skipped.push(format!(
                "row {row_number}: expected at least {width} fields, got {}",
                fields.len()
            ));
            continue;
        }

        let symbol = match Symbol::parse(fields[symbol_at]) {
            Ok(symbol) => symbol,
            Err(error) => {
                skipped.push(format!("row {row_number}: {error}"));
                continue;
            }
        };
        match Listing::new(symbol, fields[name_at], EXCHANGE, fetched_on) {
            Ok(listing) => listings.push(listing),
            Err(error) => skipped.push(format!("row {row_number}: {error}")),
        }
    }

    Ok((listings, skipped))
}
