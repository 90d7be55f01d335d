//! Offline diff of two snapshot files.

use serde_json::json;

use tickwatch_core::compute_diff;
use tickwatch_store::read_snapshot_file;

use crate::cli::DiffArgs;
use crate::error::CliError;

use super::{resolve_date, CommandResult};

pub fn run(args: &DiffArgs) -> Result<CommandResult, CliError> {
    let observed_on = resolve_date(args.date.as_deref())?;
    let previous = read_snapshot_file(&args.previous)?;
    let current = read_snapshot_file(&args.current)?;

    let report = compute_diff(Some(&previous), &current, observed_on);

    let data = json!({
        "previous": args.previous,
        "current": args.current,
        "summary": report.summary,
        "records": report.records,
    });

    Ok(CommandResult::ok(data, Vec::new()))
}
