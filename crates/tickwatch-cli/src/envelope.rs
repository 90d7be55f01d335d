//! Machine-readable response envelope for all CLI output.

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use tickwatch_core::FeedId;

const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard wrapper around every command's output.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, data: T) -> Self {
        Self { meta, data }
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    pub generated_at: String,
    pub feed_chain: Vec<FeedId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(feed_chain: Vec<FeedId>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .expect("UTC timestamp must be RFC3339 formattable"),
            feed_chain,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
