//! Fetch the feeds and emit the merged snapshot, nothing persisted.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use tickwatch_core::{default_feeds, merge_batches, HttpClient, ReqwestHttpClient};

use crate::cli::{Cli, FetchArgs};
use crate::error::CliError;

use super::{cap_skip_warnings, resolve_date, CommandResult};

pub async fn run(cli: &Cli, args: &FetchArgs) -> Result<CommandResult, CliError> {
    let observed_on = resolve_date(args.date.as_deref())?;

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let feeds = default_feeds(http, cli.timeout_ms);
    let feed_chain = feeds.iter().map(|feed| feed.id()).collect();

    let mut batches = Vec::with_capacity(feeds.len());
    for feed in &feeds {
        info!(feed = %feed.id(), url = feed.url(), "fetching listing feed");
        let batch = feed
            .fetch(observed_on)
            .await
            .map_err(|source| CliError::Feed {
                feed: feed.id(),
                source,
            })?;
        batches.push(batch);
    }

    let outcome = merge_batches(batches);
    let mut warnings = cap_skip_warnings(outcome.skipped);
    if outcome.duplicates > 0 {
        warnings.push(format!(
            "{} duplicate symbols across feeds resolved first-seen-wins",
            outcome.duplicates
        ));
    }

    let listings: Vec<_> = outcome.snapshot.iter().collect();
    let data = json!({
        "observed_on": observed_on,
        "total": outcome.snapshot.len(),
        "listings": listings,
    });

    Ok(CommandResult::ok(data, feed_chain).with_warnings(warnings))
}
