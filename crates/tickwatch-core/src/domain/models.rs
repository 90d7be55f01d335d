use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ObservationDate, Symbol, ValidationError};

/// One row of a listing snapshot: a tradable security as reported upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: Symbol,
    /// Upstream security name; may be empty for sparse feeds.
    pub company_name: String,
    /// Exchange name or upstream-provided code (open set).
    pub exchange: String,
    /// Date the record was observed.
    pub fetched_on: ObservationDate,
}

impl Listing {
    pub fn new(
        symbol: Symbol,
        company_name: impl Into<String>,
        exchange: impl AsRef<str>,
        fetched_on: ObservationDate,
    ) -> Result<Self, ValidationError> {
        let exchange = exchange.as_ref().trim();
        if exchange.is_empty() {
            return Err(ValidationError::EmptyExchange);
        }

        Ok(Self {
            symbol,
            company_name: company_name.into().trim().to_owned(),
            exchange: exchange.to_owned(),
            fetched_on,
        })
    }
}

/// Classification of one symbol's transition between two snapshots.
///
/// Exactly one status applies per symbol. A symbol whose name and exchange
/// both changed is reported as `Renamed` only; the exchange move is still
/// visible through `old_exchange` on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeStatus {
    New,
    Delisted,
    Renamed,
    #[serde(rename = "Exchange Changed")]
    ExchangeChanged,
}

impl ChangeStatus {
    pub const ALL: [Self; 4] = [Self::New, Self::Delisted, Self::Renamed, Self::ExchangeChanged];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Delisted => "Delisted",
            Self::Renamed => "Renamed",
            Self::ExchangeChanged => "Exchange Changed",
        }
    }
}

impl Display for ChangeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "New" => Ok(Self::New),
            "Delisted" => Ok(Self::Delisted),
            "Renamed" => Ok(Self::Renamed),
            "Exchange Changed" => Ok(Self::ExchangeChanged),
            other => Err(ValidationError::InvalidStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// One classified transition for a single symbol.
///
/// Current-side fields are empty for `Delisted`; old-side fields are empty
/// for `New`. Empty strings rather than options keep the serialized row shape
/// identical across statuses, which keeps report files diffable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub symbol: Symbol,
    pub company_name: String,
    pub exchange: String,
    pub old_name: String,
    pub old_exchange: String,
    pub status: ChangeStatus,
}

impl ChangeRecord {
    pub fn newly_listed(current: &Listing) -> Self {
        Self {
            symbol: current.symbol.clone(),
            company_name: current.company_name.clone(),
            exchange: current.exchange.clone(),
            old_name: String::new(),
            old_exchange: String::new(),
            status: ChangeStatus::New,
        }
    }

    pub fn delisted(previous: &Listing) -> Self {
        Self {
            symbol: previous.symbol.clone(),
            company_name: String::new(),
            exchange: String::new(),
            old_name: previous.company_name.clone(),
            old_exchange: previous.exchange.clone(),
            status: ChangeStatus::Delisted,
        }
    }

    pub fn renamed(previous: &Listing, current: &Listing) -> Self {
        Self::transition(previous, current, ChangeStatus::Renamed)
    }

    pub fn exchange_changed(previous: &Listing, current: &Listing) -> Self {
        Self::transition(previous, current, ChangeStatus::ExchangeChanged)
    }

    fn transition(previous: &Listing, current: &Listing, status: ChangeStatus) -> Self {
        Self {
            symbol: current.symbol.clone(),
            company_name: current.company_name.clone(),
            exchange: current.exchange.clone(),
            old_name: previous.company_name.clone(),
            old_exchange: previous.exchange.clone(),
            status,
        }
    }
}

/// Per-run counters over the emitted change records, tagged with the
/// observation date. Appended to the history log once computed; never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub observed_on: ObservationDate,
    pub total_current: usize,
    pub new: usize,
    pub delisted: usize,
    pub renamed: usize,
    pub exchange_changed: usize,
}

impl ChangeSummary {
    pub fn empty(observed_on: ObservationDate, total_current: usize) -> Self {
        Self {
            observed_on,
            total_current,
            new: 0,
            delisted: 0,
            renamed: 0,
            exchange_changed: 0,
        }
    }

    pub fn count_for(&self, status: ChangeStatus) -> usize {
        match status {
            ChangeStatus::New => self.new,
            ChangeStatus::Delisted => self.delisted,
            ChangeStatus::Renamed => self.renamed,
            ChangeStatus::ExchangeChanged => self.exchange_changed,
        }
    }

    pub fn total_changes(&self) -> usize {
        self.new + self.delisted + self.renamed + self.exchange_changed
    }

    pub(crate) fn bump(&mut self, status: ChangeStatus) {
        match status {
            ChangeStatus::New => self.new += 1,
            ChangeStatus::Delisted => self.delisted += 1,
            ChangeStatus::Renamed => self.renamed += 1,
            ChangeStatus::ExchangeChanged => self.exchange_changed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> ObservationDate {
        ObservationDate::parse("2026-08-08").expect("valid date")
    }

    #[test]
    fn listing_trims_fields_and_rejects_empty_exchange() {
        let symbol = Symbol::parse("AAPL").expect("valid symbol");
        let listing = Listing::new(symbol.clone(), " Apple Inc. ", " NASDAQ ", date())
            .expect("listing should build");
        assert_eq!(listing.company_name, "Apple Inc.");
        assert_eq!(listing.exchange, "NASDAQ");

        let err = Listing::new(symbol, "Apple Inc.", "  ", date()).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyExchange));
    }

    #[test]
    fn status_round_trips_through_display_and_from_str() {
        for status in ChangeStatus::ALL {
            let parsed: ChangeStatus = status.as_str().parse().expect("must parse");
            assert_eq!(parsed, status);
        }
        assert_eq!(ChangeStatus::ExchangeChanged.as_str(), "Exchange Changed");
    }

    #[test]
    fn status_serializes_with_spaced_variant() {
        let json = serde_json::to_string(&ChangeStatus::ExchangeChanged).expect("serialize");
        assert_eq!(json, "\"Exchange Changed\"");
    }

    #[test]
    fn delisted_record_clears_current_fields() {
        let listing = Listing::new(
            Symbol::parse("X").expect("valid symbol"),
            "X Corp",
            "NASDAQ",
            date(),
        )
        .expect("listing should build");

        let record = ChangeRecord::delisted(&listing);
        assert_eq!(record.symbol.as_str(), "X");
        assert!(record.company_name.is_empty());
        assert!(record.exchange.is_empty());
        assert_eq!(record.old_name, "X Corp");
        assert_eq!(record.old_exchange, "NASDAQ");
    }

    #[test]
    fn summary_counts_by_status() {
        let mut summary = ChangeSummary::empty(date(), 10);
        summary.bump(ChangeStatus::New);
        summary.bump(ChangeStatus::New);
        summary.bump(ChangeStatus::Renamed);

        assert_eq!(summary.count_for(ChangeStatus::New), 2);
        assert_eq!(summary.count_for(ChangeStatus::Renamed), 1);
        assert_eq!(summary.count_for(ChangeStatus::Delisted), 0);
        assert_eq!(summary.total_changes(), 3);
        assert_eq!(summary.total_current, 10);
    }
}
