//! List the configured upstream feeds.

use std::sync::Arc;

use serde_json::json;

use tickwatch_core::{default_feeds, HttpClient, NoopHttpClient};

use crate::cli::FeedsArgs;

use super::CommandResult;

pub fn run(args: &FeedsArgs) -> CommandResult {
    // Construction only; nothing is fetched here.
    let http: Arc<dyn HttpClient> = Arc::new(NoopHttpClient);
    let feeds = default_feeds(http, 0);

    let listed: Vec<_> = feeds
        .iter()
        .map(|feed| {
            if args.verbose {
                json!({
                    "id": feed.id(),
                    "url": feed.url(),
                    "format": match feed.id().as_str() {
                        "nyse_listed" => "comma-delimited CSV",
                        _ => "pipe-delimited symbol directory",
                    },
                })
            } else {
                json!({
                    "id": feed.id(),
                    "url": feed.url(),
                })
            }
        })
        .collect();

    let data = json!({
        "precedence": "first-seen-wins, in listed order",
        "feeds": listed,
    });

    CommandResult::ok(data, feeds.iter().map(|feed| feed.id()).collect())
}
