use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::delivery::DeliveryRecord;

/// Default number of deliveries kept for inspection
pub const DEFAULT_CAPACITY: usize = 10;

/// Bounded, most-recent-first in-memory log of accepted deliveries
#[derive(Debug, Clone)]
pub struct RecentDeliveries {
    entries: Arc<RwLock<VecDeque<Arc<DeliveryRecord>>>>,

    capacity: usize,
}

impl RecentDeliveries {
    /// Create a buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a buffer holding at most `capacity` deliveries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert at the head, silently evicting the oldest entry when full
    pub async fn push_front(&self, record: Arc<DeliveryRecord>) {
        let mut entries = self.entries.write().await;
        entries.push_front(record);

        while entries.len() > self.capacity {
            if let Some(evicted) = entries.pop_back() {
                debug!(
                    delivery_id = evicted.delivery_id.as_deref().unwrap_or("-"),
                    "Evicted oldest delivery from recent buffer"
                );
            }
        }
    }

    /// Point-in-time copy, most recent first
    pub async fn snapshot(&self) -> Vec<Arc<DeliveryRecord>> {
        let entries = self.entries.read().await;
        entries.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for RecentDeliveries {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::delivery::DeliveryHeaders;
    use serde_json::json;

    fn record(n: usize) -> Arc<DeliveryRecord> {
        let headers = DeliveryHeaders {
            event: Some("push".to_string()),
            signature: None,
            delivery: Some(format!("delivery-{n}")),
        };
        Arc::new(DeliveryRecord::new(headers, json!({ "n": n })))
    }

    fn ids(snapshot: &[Arc<DeliveryRecord>]) -> Vec<String> {
        snapshot
            .iter()
            .map(|r| r.delivery_id.clone().unwrap_or_default())
            .collect()
    }

    #[tokio::test]
    async fn test_new_buffer_is_empty() {
        let buffer = RecentDeliveries::new();

        assert!(buffer.is_empty().await);
        assert_eq!(buffer.capacity(), 10);
        assert!(buffer.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_most_recent_first() {
        let buffer = RecentDeliveries::with_capacity(5);
        for n in 0..3 {
            buffer.push_front(record(n)).await;
        }

        let snapshot = buffer.snapshot().await;
        assert_eq!(ids(&snapshot), vec!["delivery-2", "delivery-1", "delivery-0"]);
    }

    #[tokio::test]
    async fn test_overflow_keeps_last_n() {
        let capacity = 4;
        for extra in 0..6 {
            let buffer = RecentDeliveries::with_capacity(capacity);
            let total = capacity + extra;
            for n in 0..total {
                buffer.push_front(record(n)).await;
            }

            let snapshot = buffer.snapshot().await;
            assert_eq!(snapshot.len(), total.min(capacity));

            let expected: Vec<String> = (extra..total)
                .rev()
                .map(|n| format!("delivery-{n}"))
                .collect();
            assert_eq!(ids(&snapshot), expected);
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_from_buffer() {
        let buffer = RecentDeliveries::with_capacity(3);
        buffer.push_front(record(0)).await;

        let mut snapshot = buffer.snapshot().await;
        snapshot.clear();
        buffer.push_front(record(1)).await;

        assert!(snapshot.is_empty());
        assert_eq!(buffer.len().await, 2);
    }

    #[tokio::test]
    async fn test_records_are_shared_not_copied() {
        let buffer = RecentDeliveries::new();
        let original = record(7);
        buffer.push_front(original.clone()).await;

        let snapshot = buffer.snapshot().await;
        assert!(Arc::ptr_eq(&snapshot[0], &original));
    }

    #[tokio::test]
    async fn test_zero_capacity_retains_nothing() {
        let buffer = RecentDeliveries::with_capacity(0);
        buffer.push_front(record(0)).await;

        assert!(buffer.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_respect_capacity() {
        let buffer = RecentDeliveries::with_capacity(10);
        let mut tasks = Vec::new();
        for n in 0..50 {
            let buffer = buffer.clone();
            tasks.push(tokio::spawn(async move { buffer.push_front(record(n)).await }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(buffer.len().await, 10);
    }
}
