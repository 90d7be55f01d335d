//! Change classification between two listing snapshots.
//!
//! [`compute_diff`] is a pure function of `(previous, current)`; it performs
//! no I/O and owns no state. Identical inputs always produce identical
//! output, record for record.
//!
//! Classification per symbol is mutually exclusive:
//!
//! | Condition | Status |
//! |-----------|--------|
//! | in current only | `New` |
//! | in previous only | `Delisted` |
//! | name differs | `Renamed` (even if the exchange also moved) |
//! | only exchange differs | `Exchange Changed` |
//! | identical | no record |
//!
//! Records are grouped by status in the fixed order New, Delisted, Renamed,
//! Exchange Changed; within a group they follow snapshot insertion order.

use serde::{Deserialize, Serialize};

use crate::{ChangeRecord, ChangeStatus, ChangeSummary, Listing, ObservationDate, Snapshot};

/// Output of one diff run: the classified records plus their counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub records: Vec<ChangeRecord>,
    pub summary: ChangeSummary,
}

/// Classify one symbol present in both snapshots.
///
/// Rename takes precedence over an exchange move; the old exchange is still
/// carried on the record, so a simultaneous move is visible without a second
/// record.
pub fn classify(previous: &Listing, current: &Listing) -> Option<ChangeStatus> {
    if previous.company_name != current.company_name {
        Some(ChangeStatus::Renamed)
    } else if previous.exchange != current.exchange {
        Some(ChangeStatus::ExchangeChanged)
    } else {
        None
    }
}

/// Compute the classified delta from `previous` to `current`.
///
/// A `None` previous snapshot is the cold-start case: there is no baseline to
/// compare against, so every current row is classified `New` and seeds the
/// next run's baseline.
///
/// `observed_on` tags the summary; the engine treats it as an opaque input.
pub fn compute_diff(
    previous: Option<&Snapshot>,
    current: &Snapshot,
    observed_on: ObservationDate,
) -> DiffReport {
    let Some(previous) = previous else {
        let records: Vec<ChangeRecord> = current.iter().map(ChangeRecord::newly_listed).collect();
        let mut summary = ChangeSummary::empty(observed_on, current.len());
        summary.new = records.len();
        return DiffReport { records, summary };
    };

    let mut added = Vec::new();
    let mut renamed = Vec::new();
    let mut moved = Vec::new();
    for listing in current.iter() {
        match previous.get(&listing.symbol) {
            None => added.push(ChangeRecord::newly_listed(listing)),
            Some(old) => match classify(old, listing) {
                Some(ChangeStatus::Renamed) => renamed.push(ChangeRecord::renamed(old, listing)),
                Some(ChangeStatus::ExchangeChanged) => {
                    moved.push(ChangeRecord::exchange_changed(old, listing));
                }
                _ => {}
            },
        }
    }

    let removed: Vec<ChangeRecord> = previous
        .iter()
        .filter(|listing| !current.contains(&listing.symbol))
        .map(ChangeRecord::delisted)
        .collect();

    let mut summary = ChangeSummary::empty(observed_on, current.len());
    let mut records = Vec::with_capacity(added.len() + removed.len() + renamed.len() + moved.len());
    for group in [added, removed, renamed, moved] {
        for record in group {
            summary.bump(record.status);
            records.push(record);
        }
    }

    DiffReport { records, summary }
}
