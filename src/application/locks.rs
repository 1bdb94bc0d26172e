//! Keyed mutual exclusion for per-cart writes and per-quote capture.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A table of async mutexes addressed by string key.
///
/// Serializes the mutating operations on one cart key and the
/// capture-then-record window of one quote. Entries are small and kept for
/// the life of the process; keys are bounded by live carts and quotes.
#[derive(Debug, Default)]
pub struct KeyedLock {
    cells: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLock {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting if another holder is active.
    ///
    /// The critical section lasts as long as the returned guard.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let cell = self
            .cells
            .entry(key.to_owned())
            .or_default()
            .clone();
        cell.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn same_key_serializes() {
        let locks = Arc::new(KeyedLock::new());
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("cart:b1:s1").await;
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                running.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_keys_are_independent() {
        let locks = KeyedLock::new();
        let _a = locks.acquire("a").await;
        // Must not deadlock waiting on an unrelated key.
        let _b = locks.acquire("b").await;
    }
}
