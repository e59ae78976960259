//! In-process weight store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StoreResult;
use super::store::{WeightEntry, WeightStore};

/// Weight store kept entirely in memory.
///
/// Entries are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryWeightStore {
    entries: RwLock<Vec<WeightEntry>>,
}

impl MemoryWeightStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries appended so far.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no entry has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl WeightStore for MemoryWeightStore {
    async fn append(&self, entry: WeightEntry) -> StoreResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn list_ascending(&self) -> StoreResult<Vec<WeightEntry>> {
        let mut entries = self.entries.read().await.clone();
        // Stable sort keeps insertion order for identical timestamps.
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_memory_store_orders_by_timestamp() {
        let store = MemoryWeightStore::new();
        let later = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();

        store.append(WeightEntry::new(later, 149.0)).await.unwrap();
        store.append(WeightEntry::new(earlier, 150.0)).await.unwrap();

        let entries = store.list_ascending().await.unwrap();
        assert_eq!(entries[0].weight_lbs, 150.0);
        assert_eq!(entries[1].weight_lbs, 149.0);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_memory_store_ties_keep_insertion_order() {
        let store = MemoryWeightStore::new();
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();

        for weight in [151.0, 150.5, 150.0] {
            store.append(WeightEntry::new(ts, weight)).await.unwrap();
        }

        let weights: Vec<_> = store
            .list_ascending()
            .await
            .unwrap()
            .iter()
            .map(|e| e.weight_lbs)
            .collect();
        assert_eq!(weights, vec![151.0, 150.5, 150.0]);
    }

    #[tokio::test]
    async fn test_memory_store_starts_empty() {
        let store = MemoryWeightStore::new();
        assert!(store.is_empty().await);
        assert!(store.list_ascending().await.unwrap().is_empty());
    }
}
