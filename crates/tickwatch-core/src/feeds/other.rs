use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::{column_index, is_creation_trailer};
use crate::feed::{FeedBatch, FeedError, FeedId, ListingFeed};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{Listing, ObservationDate, Symbol};

pub const OTHER_LISTED_URL: &str =
    "https://www.nasdaqtrader.com/dynamic/symdir/otherlisted.txt";

/// Non-Nasdaq exchange listings from the Nasdaq Trader symbol directory.
///
/// The Exchange column carries single-letter venue codes; common codes are
/// normalized to conventional exchange names, unknown codes pass through
/// verbatim (the exchange set is open).
pub struct OtherListedFeed {
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl OtherListedFeed {
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

impl ListingFeed for OtherListedFeed {
    fn id(&self) -> FeedId {
        FeedId::OtherListed
    }

    fn url(&self) -> &str {
        OTHER_LISTED_URL
    }

    fn fetch<'a>(
        &'a self,
        fetched_on: ObservationDate,
    ) -> Pin<Box<dyn Future<Output = Result<FeedBatch, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(OTHER_LISTED_URL).with_timeout_ms(self.timeout_ms);
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

            let (listings, skipped) = parse_other_listed(&response.body, fetched_on)?;
            Ok(FeedBatch {
                feed: FeedId::OtherListed,
                listings,
                skipped,
            })
        })
    }
}

/// Map Nasdaq Trader single-letter venue codes to conventional names.
fn normalize_exchange_code(code: &str) -> String {
    match code.trim() {
        "A" => String::from("AMEX"),
        "N" => String::from("NYSE"),
        "P" => String::from("NYSEARCA"),
        "Z" => String::from("BATS"),
        "V" => String::from("IEX"),
        other => other.to_ascii_uppercase(),
    }
}

fn parse_other_listed(
    body: &str,
    fetched_on: ObservationDate,
) -> Result<(Vec<Listing>, Vec<String>), FeedError> {
    let mut lines = body.lines();
    let header = lines
        .next()
        .ok_or_else(|| FeedError::Malformed(String::from("empty payload")))?;
    let header_fields: Vec<&str> = header.split('|').collect();
    let symbol_at = column_index(&header_fields, "ACT Symbol")?;
    let name_at = column_index(&header_fields, "Security Name")?;
    let exchange_at = column_index(&header_fields, "Exchange")?;
    let width = symbol_at.max(name_at).max(exchange_at) + 1;

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
        let exchange = normalize_exchange_code(fields[exchange_at]);
        match Listing::new(symbol, fields[name_at], exchange, fetched_on) {
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
ACT Symbol|Security Name|Exchange|CQS Symbol|ETF|Round Lot Size|Test Issue|NYSE Symbol
A|Agilent Technologies, Inc. Common Stock|N|A|N|100|N|A
ACU|Acme United Corporation. Common Stock|A|ACU|N|100|N|ACU
CBOE|Cboe Global Markets, Inc. Common Stock|Z|CBOE|N|100|N|CBOE
File Creation Time: 0808202607:05|||||||";

    fn date() -> ObservationDate {
        ObservationDate::parse("2026-08-08").expect("valid date")
    }

    #[test]
    fn parses_rows_and_normalizes_exchange_codes() {
        let (listings, skipped) = parse_other_listed(SAMPLE, date()).expect("must parse");
        assert!(skipped.is_empty());

        let exchanges: Vec<&str> = listings.iter().map(|l| l.exchange.as_str()).collect();
        assert_eq!(exchanges, ["NYSE", "AMEX", "BATS"]);
    }

    #[test]
    fn unknown_exchange_code_passes_through() {
        assert_eq!(normalize_exchange_code(" q "), "Q");
        assert_eq!(normalize_exchange_code("NYSE"), "NYSE");
    }

    #[test]
    fn empty_exchange_is_skipped_not_fatal() {
        let body = "\
ACT Symbol|Security Name|Exchange
GOOD|Good Corp|N
BAD|Bad Corp|";
        let (listings, skipped) = parse_other_listed(body, date()).expect("must parse");
        assert_eq!(listings.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].contains("exchange cannot be empty"));
    }

    #[test]
    fn missing_exchange_column_is_malformed() {
        let err = parse_other_listed("ACT Symbol|Security Name\nA|Agilent", date())
            .expect_err("must fail");
        assert!(matches!(err, FeedError::Malformed(_)));
    }
}
