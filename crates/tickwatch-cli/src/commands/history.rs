//! Read back the per-run change summary history.

use serde_json::json;

use tickwatch_store::HistoryLog;

use crate::cli::{Cli, HistoryArgs};
use crate::error::CliError;

use super::CommandResult;

pub fn run(cli: &Cli, args: &HistoryArgs) -> Result<CommandResult, CliError> {
    let log = HistoryLog::new(cli.history_path());
    let mut entries = log.read_all()?;

    if let Some(limit) = args.limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }

    let data = json!({
        "path": log.path(),
        "entries": entries,
    });

    let result = CommandResult::ok(data, Vec::new());
    if !log.path().exists() {
        return Ok(result.with_warning("no history yet; run 'tickwatch run' first"));
    }
    Ok(result)
}
