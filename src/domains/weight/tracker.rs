//! Weight analytics: logging, history, and change since the first entry.

use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use tracing::debug;

use super::error::StoreResult;
use super::store::{WeightEntry, WeightStore};

/// Outcome of a change computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangeOutcome {
    /// `last - first` in pounds, over entries sorted oldest first.
    Change(f64),

    /// Fewer than two entries exist. This is an expected state, not a fault.
    InsufficientData,
}

/// Compute the change between the first and last entry of an ascending slice.
///
/// First and last are taken by position; no other selection rule applies.
pub fn weight_change(entries: &[WeightEntry]) -> ChangeOutcome {
    match entries {
        [first, .., last] => ChangeOutcome::Change(last.weight_lbs - first.weight_lbs),
        _ => ChangeOutcome::InsufficientData,
    }
}

/// Weight analytics layered on a [`WeightStore`].
#[derive(Clone)]
pub struct WeightTracker {
    store: Arc<dyn WeightStore>,
}

impl WeightTracker {
    /// Create a tracker over the given store.
    pub fn new(store: Arc<dyn WeightStore>) -> Self {
        Self { store }
    }

    /// Record `weight` at the current time, truncated to whole seconds.
    pub async fn log(&self, weight: f64) -> StoreResult<WeightEntry> {
        self.log_at(weight, Utc::now().trunc_subsecs(0)).await
    }

    /// Record `weight` at an explicit time.
    pub async fn log_at(&self, weight: f64, timestamp: DateTime<Utc>) -> StoreResult<WeightEntry> {
        let entry = WeightEntry::new(timestamp, weight);
        self.store.append(entry.clone()).await?;
        debug!("Logged {} lbs at {}", weight, entry.timestamp_rfc3339());
        Ok(entry)
    }

    /// All entries, oldest first.
    pub async fn history(&self) -> StoreResult<Vec<WeightEntry>> {
        let mut entries = self.store.list_ascending().await?;
        // Stores already sort; re-sorting stably keeps their tie-break intact.
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(entries)
    }

    /// Change from the oldest to the newest entry.
    pub async fn change(&self) -> StoreResult<ChangeOutcome> {
        let history = self.history().await?;
        Ok(weight_change(&history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::weight::MemoryWeightStore;
    use chrono::{Duration, TimeZone};

    fn tracker() -> WeightTracker {
        WeightTracker::new(Arc::new(MemoryWeightStore::new()))
    }

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap() + Duration::days(n)
    }

    #[tokio::test]
    async fn test_change_is_last_minus_first() {
        let tracker = tracker();
        tracker.log_at(150.0, day(0)).await.unwrap();
        tracker.log_at(148.5, day(1)).await.unwrap();
        tracker.log_at(149.0, day(2)).await.unwrap();

        assert_eq!(tracker.change().await.unwrap(), ChangeOutcome::Change(-1.0));
    }

    #[tokio::test]
    async fn test_change_uses_chronological_order_not_insertion() {
        let tracker = tracker();
        tracker.log_at(149.0, day(2)).await.unwrap();
        tracker.log_at(150.0, day(0)).await.unwrap();
        tracker.log_at(120.0, day(1)).await.unwrap();

        assert_eq!(tracker.change().await.unwrap(), ChangeOutcome::Change(-1.0));
    }

    #[tokio::test]
    async fn test_change_needs_two_entries() {
        let tracker = tracker();
        assert_eq!(
            tracker.change().await.unwrap(),
            ChangeOutcome::InsufficientData
        );

        tracker.log_at(150.0, day(0)).await.unwrap();
        assert_eq!(
            tracker.change().await.unwrap(),
            ChangeOutcome::InsufficientData
        );
    }

    #[tokio::test]
    async fn test_log_then_history_contains_exact_weight() {
        let tracker = tracker();
        tracker.log_at(150.0, day(0)).await.unwrap();
        let entry = tracker.log(151.7).await.unwrap();

        let history = tracker.history().await.unwrap();
        let last = history.last().unwrap();
        assert_eq!(last.weight_lbs, 151.7);
        assert_eq!(last, &entry);
        assert!(history[0].timestamp <= last.timestamp);
    }

    #[tokio::test]
    async fn test_log_truncates_to_whole_seconds() {
        let entry = tracker().log(150.0).await.unwrap();
        assert_eq!(entry.timestamp.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_weight_change_on_slices() {
        assert_eq!(weight_change(&[]), ChangeOutcome::InsufficientData);

        let two = [WeightEntry::new(day(0), 150.0), WeightEntry::new(day(1), 152.5)];
        assert_eq!(weight_change(&two), ChangeOutcome::Change(2.5));
    }
}
