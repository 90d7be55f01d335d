//! The full pipeline: fetch feeds → diff against baseline → persist.
//!
//! Persistence order matters: reports first, then the baseline, then the
//! history line. The baseline is only ever written after the diff completes,
//! so an aborted run leaves the previous baseline intact for the retry.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use tickwatch_core::{
    compute_diff, default_feeds, merge_batches, HttpClient, ReqwestHttpClient,
};
use tickwatch_store::{HistoryLog, ReportWriter, SnapshotStore};

use crate::cli::{Cli, RunArgs};
use crate::error::CliError;

use super::{cap_skip_warnings, resolve_date, CommandResult};

/// Delisted share of the previous snapshot above which the run warns; a feed
/// outage looks exactly like a mass delisting.
const DELISTED_WARN_PERCENT: usize = 25;

pub async fn run(cli: &Cli, args: &RunArgs) -> Result<CommandResult, CliError> {
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
        info!(feed = %feed.id(), rows = batch.listings.len(), "feed normalized");
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

    let store = SnapshotStore::new(cli.snapshot_path());
    let previous = store.load_previous()?;
    let previous_len = previous.as_ref().map_or(0, |snapshot| snapshot.len());
    let bootstrap = previous.is_none();

    let report = compute_diff(previous.as_ref(), &outcome.snapshot, observed_on);
    info!(
        new = report.summary.new,
        delisted = report.summary.delisted,
        renamed = report.summary.renamed,
        exchange_changed = report.summary.exchange_changed,
        total = report.summary.total_current,
        "diff computed"
    );

    if bootstrap {
        warnings.push(String::from(
            "no baseline found; cold start, every listing reported as New",
        ));
    } else if previous_len > 0
        && report.summary.delisted * 100 >= previous_len * DELISTED_WARN_PERCENT
        && report.summary.delisted > 0
    {
        warnings.push(format!(
            "{} of {} baseline symbols delisted in one run; check feed health before trusting this diff",
            report.summary.delisted, previous_len
        ));
    }

    let written = if args.dry_run {
        warnings.push(String::from(
            "dry run: baseline, history, and reports not written",
        ));
        serde_json::Value::Null
    } else {
        let reports = ReportWriter::new(&cli.data_dir);
        let master = reports.write_master_csv(&outcome.snapshot, observed_on)?;
        let diff = reports.write_diff_csv(&report.records, observed_on)?;
        let jsonl = reports.write_snapshot_jsonl(&outcome.snapshot)?;
        store.save(&outcome.snapshot)?;
        HistoryLog::new(cli.history_path()).append(&report.summary)?;
        json!({
            "master_csv": master,
            "diff_csv": diff,
            "snapshot_jsonl": jsonl,
            "baseline": store.path(),
            "history": cli.history_path(),
        })
    };

    let data = json!({
        "observed_on": observed_on,
        "bootstrap": bootstrap,
        "summary": report.summary,
        "records": report.records,
        "written": written,
    });

    Ok(CommandResult::ok(data, feed_chain).with_warnings(warnings))
}
