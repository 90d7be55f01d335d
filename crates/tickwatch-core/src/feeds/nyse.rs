use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::feed::{FeedBatch, FeedError, FeedId, ListingFeed};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{Listing, ObservationDate, Symbol};

pub const NYSE_LISTED_URL: &str =
    "https://datahub.io/core/nyse-other-listings/r/nyse-listed.csv";

const EXCHANGE: &str = "NYSE";

/// NYSE-listed securities from the datahub registry CSV.
pub struct NyseListedFeed {
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl NyseListedFeed {
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

impl ListingFeed for NyseListedFeed {
    fn id(&self) -> FeedId {
        FeedId::NyseListed
    }

    fn url(&self) -> &str {
        NYSE_LISTED_URL
    }

    fn fetch<'a>(
        &'a self,
        fetched_on: ObservationDate,
    ) -> Pin<Box<dyn Future<Output = Result<FeedBatch, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(NYSE_LISTED_URL).with_timeout_ms(self.timeout_ms);
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

            let (listings, skipped) = parse_nyse_listed(&response.body, fetched_on)?;
            Ok(FeedBatch {
                feed: FeedId::NyseListed,
                listings,
                skipped,
            })
        })
    }
}

fn parse_nyse_listed(
    body: &str,
    fetched_on: ObservationDate,
) -> Result<(Vec<Listing>, Vec<String>), FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| FeedError::Malformed(error.to_string()))?
        .clone();
    let symbol_at = headers
        .iter()
        .position(|field| field.trim() == "ACT Symbol")
        .ok_or_else(|| FeedError::Malformed(String::from("missing 'ACT Symbol' column in header")))?;
    let name_at = headers
        .iter()
        .position(|field| field.trim() == "Company Name")
        .ok_or_else(|| {
            FeedError::Malformed(String::from("missing 'Company Name' column in header"))
        })?;

    let mut listings = Vec::new();
    let mut skipped = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let row_number = offset + 2;
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                skipped.push(format!("row {row_number}: {error}"));
                continue;
            }
        };

        let (Some(raw_symbol), Some(name)) = (record.get(symbol_at), record.get(name_at)) else {
            skipped.push(format!("row {row_number}: missing fields"));
            continue;
        };

        let symbol = match Symbol::parse(raw_symbol) {
            Ok(symbol) => symbol,
            Err(error) => {
                skipped.push(format!("row {row_number}: {error}"));
                continue;
            }
        };
        match Listing::new(symbol, name, EXCHANGE, fetched_on) {
            Ok(listing) => listings.push(listing),
            Err(error) => skipped.push(format!("row {row_number}: {error}")),
        }
    }

    Ok((listings, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ACT Symbol,Company Name
A,\"Agilent Technologies, Inc.\"
GE,GE Aerospace
";

    fn date() -> ObservationDate {
        ObservationDate::parse("2026-08-08").expect("valid date")
    }

    #[test]
    fn parses_quoted_company_names() {
        let (listings, skipped) = parse_nyse_listed(SAMPLE, date()).expect("must parse");
        assert!(skipped.is_empty());
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].company_name, "Agilent Technologies, Inc.");
        assert_eq!(listings[0].exchange, "NYSE");
    }

    #[test]
    fn invalid_symbols_are_skipped_with_reasons() {
        let body = "ACT Symbol,Company Name\n,Missing Symbol Co\nGE,GE Aerospace\n";
        let (listings, skipped) = parse_nyse_listed(body, date()).expect("must parse");
        assert_eq!(listings.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].starts_with("row 2:"));
    }

    #[test]
    fn missing_header_column_is_malformed() {
        let err = parse_nyse_listed("Symbol,Name\nGE,GE Aerospace\n", date()).expect_err("must fail");
        assert!(matches!(err, FeedError::Malformed(_)));
    }
}
