mod diff;
mod feeds;
mod fetch;
mod history;
mod run;

use serde_json::Value;

use tickwatch_core::{FeedId, ObservationDate};

use crate::cli::{Cli, Command};
use crate::envelope::{Envelope, EnvelopeMeta};
use crate::error::CliError;

/// Cap on skipped-row warnings surfaced per run; the rest are summarized.
const MAX_SKIP_WARNINGS: usize = 8;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub feed_chain: Vec<FeedId>,
}

impl CommandResult {
    pub fn ok(data: Value, feed_chain: Vec<FeedId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            feed_chain,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let command_result = match &cli.command {
        Command::Run(args) => run::run(cli, args).await?,
        Command::Diff(args) => diff::run(args)?,
        Command::Fetch(args) => fetch::run(cli, args).await?,
        Command::History(args) => history::run(cli, args)?,
        Command::Feeds(args) => feeds::run(args),
    };

    let CommandResult {
        data,
        warnings,
        feed_chain,
    } = command_result;

    let mut meta = EnvelopeMeta::new(feed_chain);
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::new(meta, data))
}

/// Resolve the observation date: explicit ISO override, else today in UTC.
fn resolve_date(raw: Option<&str>) -> Result<ObservationDate, CliError> {
    match raw {
        Some(value) => ObservationDate::parse(value).map_err(CliError::from),
        None => Ok(ObservationDate::today_utc()),
    }
}

/// Collapse a long list of skipped-row reasons into a bounded warning set.
fn cap_skip_warnings(skipped: Vec<String>) -> Vec<String> {
    if skipped.len() <= MAX_SKIP_WARNINGS {
        return skipped;
    }

    let overflow = skipped.len() - MAX_SKIP_WARNINGS;
    let mut capped: Vec<String> = skipped.into_iter().take(MAX_SKIP_WARNINGS).collect();
    capped.push(format!("...and {overflow} more skipped rows"));
    capped
}
