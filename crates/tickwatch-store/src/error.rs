use std::path::PathBuf;

use thiserror::Error;

/// Persistence-layer error categories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The baseline file exists but cannot be parsed into unique-keyed
    /// records. Diffing against it would misreport New/Delisted counts, so
    /// this is fatal for the run; a missing baseline is `Ok(None)` instead.
    #[error("baseline snapshot '{path}' is unreadable or malformed: {reason}")]
    FatalRead { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn fatal_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FatalRead {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
