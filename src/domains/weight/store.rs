//! Weight entry model and the persistence port.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::error::{StoreError, StoreResult};

/// A single recorded weight.
///
/// Entries are append-only: nothing in this crate mutates or deletes one
/// once it has been handed to a [`WeightStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// When the weight was recorded (UTC).
    #[serde(rename = "datetime")]
    pub timestamp: DateTime<Utc>,

    /// Recorded weight in pounds.
    pub weight_lbs: f64,
}

impl WeightEntry {
    /// Create a new entry.
    pub fn new(timestamp: DateTime<Utc>, weight_lbs: f64) -> Self {
        Self {
            timestamp,
            weight_lbs,
        }
    }

    /// The timestamp as an RFC 3339 string with whole seconds and a `Z` suffix.
    ///
    /// Every stored timestamp uses this exact shape, so lexical order of the
    /// strings equals chronological order.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Parse a timestamp previously produced by [`Self::timestamp_rfc3339`].
    pub fn parse_timestamp(value: &str) -> StoreResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StoreError::invalid_timestamp(value, e))
    }
}

/// Persistence port for weight entries.
///
/// Implementations must return entries ascending by timestamp, breaking ties
/// on identical timestamps by insertion order.
#[async_trait]
pub trait WeightStore: Send + Sync {
    /// Append a new entry.
    async fn append(&self, entry: WeightEntry) -> StoreResult<()>;

    /// List every entry, oldest first.
    async fn list_ascending(&self) -> StoreResult<Vec<WeightEntry>>;
}
