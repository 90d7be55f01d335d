use thiserror::Error;

use tickwatch_core::{FeedError, FeedId};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickwatch_core::ValidationError),

    #[error("feed '{feed}' failed: {source}")]
    Feed { feed: FeedId, source: FeedError },

    #[error(transparent)]
    Store(#[from] tickwatch_store::StoreError),

    #[error("strict mode failed: warnings={warning_count}")]
    StrictModeViolation { warning_count: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Serialization(_) => 4,
            Self::Feed { .. } => 6,
            Self::Store(_) => 7,
        }
    }
}
