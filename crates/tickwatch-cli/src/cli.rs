//! CLI argument definitions for Tickwatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Fetch feeds, diff against the baseline, persist everything |
//! | `diff` | Diff two snapshot files offline |
//! | `fetch` | Fetch feeds and emit the merged snapshot without diffing |
//! | `history` | Print the per-run change summary history |
//! | `feeds` | List configured upstream feeds |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--timeout-ms` | `10000` | Per-feed request timeout in ms |
//! | `--data-dir` | `data` | Directory for baseline, history, and reports |
//!
//! # Examples
//!
//! ```bash
//! # Nightly pipeline
//! tickwatch run
//!
//! # See what changed without touching the baseline
//! tickwatch run --dry-run --pretty
//!
//! # Offline comparison of two saved snapshots
//! tickwatch diff data/listings_2026-08-07.csv data/listings_2026-08-08.csv
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Exchange listing change tracker.
///
/// Pulls the Nasdaq Trader and NYSE symbol directories, classifies what
/// changed since the last run (new listings, delistings, renames, exchange
/// moves), and keeps a running history.
#[derive(Debug, Parser)]
#[command(
    name = "tickwatch",
    author,
    version,
    about = "Exchange listing change tracker",
    long_about = "Tickwatch pulls the US exchange symbol directories, diffs them against the \
previous run's baseline, and classifies every transition:\n\
\n\
  • New — symbol appeared since the last run\n\
  • Delisted — symbol disappeared\n\
  • Renamed — company name changed (wins over a simultaneous exchange move)\n\
  • Exchange Changed — only the venue changed\n\
\n\
Use 'tickwatch <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON object (default)
    /// - ndjson: One JSON object per line
    /// - table: ASCII table format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    ///
    /// Useful for pipelines that must not silently skip feed rows.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Per-feed request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Directory holding the baseline, history, and report files.
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Baseline snapshot file (default: `<data-dir>/listings_baseline.csv`).
    #[arg(long, global = true)]
    pub snapshot_file: Option<PathBuf>,

    /// Change history file (default: `<data-dir>/change_history.csv`).
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("listings_baseline.csv"))
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("change_history.csv"))
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch feeds, diff against the baseline, and persist the results.
    ///
    /// Writes the dated master list, the dated diff report, the JSONL
    /// export, the new baseline, and one history line — in that order, and
    /// only after the diff is computed.
    ///
    /// # Examples
    ///
    ///   tickwatch run
    ///   tickwatch run --dry-run
    ///   tickwatch run --date 2026-08-08 --strict
    Run(RunArgs),

    /// Diff two snapshot files offline.
    ///
    /// Compares `<PREVIOUS>` to `<CURRENT>` with the same classification
    /// rules as `run`, but touches no baseline and writes nothing.
    ///
    /// # Examples
    ///
    ///   tickwatch diff data/listings_2026-08-07.csv data/listings_2026-08-08.csv
    Diff(DiffArgs),

    /// Fetch feeds and emit the merged snapshot without diffing.
    ///
    /// # Examples
    ///
    ///   tickwatch fetch --pretty
    Fetch(FetchArgs),

    /// Print the per-run change summary history.
    ///
    /// # Examples
    ///
    ///   tickwatch history
    ///   tickwatch history --limit 10 --format table
    History(HistoryArgs),

    /// List configured upstream feeds in precedence order.
    Feeds(FeedsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Compute and report the diff without writing the baseline, history,
    /// or report files.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Observation date override, ISO yyyy-mm-dd (default: today, UTC).
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `diff` command.
#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot file to diff from.
    pub previous: PathBuf,

    /// Snapshot file to diff to.
    pub current: PathBuf,

    /// Observation date override, ISO yyyy-mm-dd (default: today, UTC).
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `fetch` command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Observation date override, ISO yyyy-mm-dd (default: today, UTC).
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Only the most recent N entries.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for the `feeds` command.
#[derive(Debug, Args)]
pub struct FeedsArgs {
    /// Include upstream format details.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
