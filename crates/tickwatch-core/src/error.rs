use thiserror::Error;

/// Validation errors exposed by `tickwatch-core` domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("exchange cannot be empty")]
    EmptyExchange,

    #[error("date must be ISO yyyy-mm-dd: '{value}'")]
    InvalidDate { value: String },

    #[error("invalid change status '{value}', expected one of New, Delisted, Renamed, Exchange Changed")]
    InvalidStatus { value: String },
    #[error("invalid feed '{value}', expected one of nasdaq_listed, other_listed, nyse_listed")]
    InvalidFeed { value: String },
}
