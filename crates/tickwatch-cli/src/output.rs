//! Rendering of the response envelope in the supported output formats.

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::envelope::Envelope;
use crate::error::CliError;

/// Array keys the table and ndjson renderers know how to lay out.
const TABLE_LAYOUTS: &[(&str, &[&str])] = &[
    (
        "records",
        &["symbol", "status", "company_name", "exchange", "old_name", "old_exchange"],
    ),
    ("listings", &["symbol", "company_name", "exchange", "fetched_on"]),
    (
        "entries",
        &["observed_on", "total_current", "new", "delisted", "renamed", "exchange_changed"],
    ),
    ("feeds", &["id", "url"]),
];

pub fn render(envelope: &Envelope<Value>, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let text = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{text}");
        }
        OutputFormat::Ndjson => render_ndjson(envelope)?,
        OutputFormat::Table => render_table(envelope)?,
    }
    Ok(())
}

fn render_ndjson(envelope: &Envelope<Value>) -> Result<(), CliError> {
    let meta = serde_json::to_value(&envelope.meta)?;
    println!("{}", serde_json::to_string(&serde_json::json!({ "meta": meta }))?);

    if let Some((_, rows)) = known_rows(&envelope.data) {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    } else {
        println!("{}", serde_json::to_string(&envelope.data)?);
    }
    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<(), CliError> {
    for warning in &envelope.meta.warnings {
        eprintln!("warning: {warning}");
    }

    if let Some(summary) = envelope.data.get("summary") {
        println!("{}", summary_line(summary));
    }

    match known_rows(&envelope.data) {
        Some((columns, rows)) => print_table(columns, rows),
        None => println!("{}", serde_json::to_string_pretty(&envelope.data)?),
    }
    Ok(())
}

fn known_rows(data: &Value) -> Option<(&'static [&'static str], &Vec<Value>)> {
    for (key, columns) in TABLE_LAYOUTS.iter().copied() {
        if let Some(Value::Array(rows)) = data.get(key) {
            return Some((columns, rows));
        }
    }
    None
}

fn summary_line(summary: &Value) -> String {
    let count = |key: &str| summary.get(key).and_then(Value::as_u64).unwrap_or(0);
    format!(
        "new {} | delisted {} | renamed {} | exchange changed {} | total {}",
        count("new"),
        count("delisted"),
        count("renamed"),
        count("exchange_changed"),
        count("total_current"),
    )
}

fn print_table(columns: &[&str], rows: &[Value]) {
    let mut widths: Vec<usize> = columns.iter().map(|name| name.len()).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(at, name)| {
                    let cell = cell_text(row.get(*name));
                    widths[at] = widths[at].max(cell.len());
                    cell
                })
                .collect()
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(at, name)| format!("{name:<width$}", width = widths[at]))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(header.join("  ").len()));

    for row in cells {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(at, cell)| format!("{cell:<width$}", width = widths[at]))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
