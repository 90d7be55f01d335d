//! Behavior-driven tests for feed fetching and snapshot merging.

use std::sync::Arc;

use tickwatch_core::{
    merge_batches, FeedError, FeedId, HttpClient, HttpError, HttpResponse, ListingFeed,
    NasdaqListedFeed, NyseListedFeed, OtherListedFeed, Symbol, NASDAQ_LISTED_URL,
};
use tickwatch_tests::{observed, StaticHttpClient};

const NASDAQ_BODY: &str = "\
Symbol|Security Name|Market Category|Test Issue|Financial Status|Round Lot Size|ETF|NextShares
AAPL|Apple Inc. - Common Stock|Q|N|N|100|N|N
MSFT|Microsoft Corporation - Common Stock|Q|N|N|100|N|N
File Creation Time: 0808202607:05|||||||";

const OTHER_BODY: &str = "\
ACT Symbol|Security Name|Exchange|CQS Symbol|ETF|Round Lot Size|Test Issue|NYSE Symbol
GE|GE Aerospace Common Stock|N|GE|N|100|N|GE
ACU|Acme United Corporation. Common Stock|A|ACU|N|100|N|ACU
File Creation Time: 0808202607:05|||||||";

const NYSE_BODY: &str = "\
ACT Symbol,Company Name
GE,GE Aerospace
A,\"Agilent Technologies, Inc.\"
";

#[tokio::test]
async fn feeds_normalize_their_upstream_formats_into_listings() {
    let date = observed("2026-08-08");

    let nasdaq = NasdaqListedFeed::new(Arc::new(StaticHttpClient::serving(NASDAQ_BODY)));
    let batch = nasdaq.fetch(date).await.expect("nasdaq fetch");
    assert_eq!(batch.feed, FeedId::NasdaqListed);
    assert_eq!(batch.listings.len(), 2);
    assert!(batch.listings.iter().all(|l| l.exchange == "NASDAQ"));

    let other = OtherListedFeed::new(Arc::new(StaticHttpClient::serving(OTHER_BODY)));
    let batch = other.fetch(date).await.expect("other fetch");
    let exchanges: Vec<&str> = batch.listings.iter().map(|l| l.exchange.as_str()).collect();
    assert_eq!(exchanges, ["NYSE", "AMEX"]);

    let nyse = NyseListedFeed::new(Arc::new(StaticHttpClient::serving(NYSE_BODY)));
    let batch = nyse.fetch(date).await.expect("nyse fetch");
    assert_eq!(batch.listings[1].company_name, "Agilent Technologies, Inc.");
    assert!(batch.listings.iter().all(|l| l.exchange == "NYSE"));
}

#[tokio::test]
async fn merged_snapshot_applies_feed_precedence_first_seen_wins() {
    let date = observed("2026-08-08");
    let http: Arc<dyn HttpClient> = Arc::new(
        StaticHttpClient::serving(NYSE_BODY)
            .with_response(NASDAQ_LISTED_URL, HttpResponse::ok_text(NASDAQ_BODY)),
    );

    // GE appears in both other_listed and nyse_listed; other_listed runs first.
    let other = OtherListedFeed::new(Arc::new(StaticHttpClient::serving(OTHER_BODY)));
    let nyse = NyseListedFeed::new(Arc::clone(&http));
    let nasdaq = NasdaqListedFeed::new(http);

    let batches = vec![
        nasdaq.fetch(date).await.expect("nasdaq fetch"),
        other.fetch(date).await.expect("other fetch"),
        nyse.fetch(date).await.expect("nyse fetch"),
    ];
    let outcome = merge_batches(batches);

    assert_eq!(outcome.duplicates, 1, "GE deduplicated");
    let ge = outcome
        .snapshot
        .get(&Symbol::parse("GE").expect("valid symbol"))
        .expect("GE present");
    assert_eq!(ge.company_name, "GE Aerospace Common Stock");
    // AAPL, MSFT, GE, ACU, A
    assert_eq!(outcome.snapshot.len(), 5);
}

#[tokio::test]
async fn upstream_http_failure_is_classified_not_swallowed() {
    let date = observed("2026-08-08");

    let feed = NasdaqListedFeed::new(Arc::new(
        StaticHttpClient::serving("").with_response(
            NASDAQ_LISTED_URL,
            HttpResponse {
                status: 503,
                body: String::from("maintenance"),
            },
        ),
    ));
    let err = feed.fetch(date).await.expect_err("must fail");
    assert!(matches!(err, FeedError::UpstreamStatus { status: 503 }));
    assert!(err.retryable());

    let feed = NasdaqListedFeed::new(Arc::new(StaticHttpClient::failing(HttpError::new(
        "connection reset",
    ))));
    let err = feed.fetch(date).await.expect_err("must fail");
    assert!(matches!(err, FeedError::Transport(_)));
}

#[tokio::test]
async fn rows_that_fail_validation_are_skipped_with_reasons() {
    let date = observed("2026-08-08");
    let body = "\
Symbol|Security Name|Market Category
GOOD|Good Corp|Q
123BAD|Numeric Start Corp|Q";

    let feed = NasdaqListedFeed::new(Arc::new(StaticHttpClient::serving(body)));
    let batch = feed.fetch(date).await.expect("fetch should succeed");

    assert_eq!(batch.listings.len(), 1);
    assert_eq!(batch.skipped.len(), 1);
    assert!(batch.skipped[0].contains("must start with an ASCII letter"));
}
