//! Per-order lock registry
//!
//! Distinct actors submit transitions for the same order concurrently
//! (kitchen marks "ready" while a customer adds an item). Every mutating
//! coordinator operation holds this lock for the full
//! read-modify-write-reload sequence; without it two racing item updates
//! can leave the order status inconsistent with its items.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry size warning threshold
const LOCK_REGISTRY_WARN_THRESHOLD: usize = 10_000;

/// Keyed mutex registry, one entry per order id
#[derive(Debug, Default)]
pub struct OrderLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl OrderLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the exclusive section for one order
    ///
    /// The guard is held across await points; drop it to release.
    pub async fn acquire(&self, order_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(order_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        if self.locks.len() > LOCK_REGISTRY_WARN_THRESHOLD {
            tracing::warn!(
                registry_size = self.locks.len(),
                "Order lock registry exceeds threshold"
            );
        }

        lock.lock_owned().await
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_order_serializes() {
        let locks = Arc::new(OrderLocks::new());
        let guard = locks.acquire("order:1").await;

        let locks2 = locks.clone();
        let contender = tokio::spawn(async move {
            let _guard = locks2.acquire("order:1").await;
        });

        // Contender cannot finish while the guard is held
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn distinct_orders_do_not_contend() {
        let locks = OrderLocks::new();
        let _a = locks.acquire("order:1").await;
        let _b = locks.acquire("order:2").await;
        assert_eq!(locks.len(), 2);
    }
}
