use std::sync::Arc;

use dashmap::DashMap;
use document_store::DocumentId;
use parking_lot::Mutex;

/// Per-feed mutual exclusion for read-modify-write of feed documents.
///
/// Publishes to the same feed run one at a time; publishes to different
/// feeds do not contend. Only callers sharing this registry (clones share
/// it) are serialized. An entry lives only while some caller holds or waits
/// on its lock.
#[derive(Clone, Default)]
pub struct FeedLocks {
    locks: Arc<DashMap<DocumentId, Arc<Mutex<()>>>>,
}

impl FeedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `feed_id`
    pub fn with_lock<R>(&self, feed_id: DocumentId, f: impl FnOnce() -> R) -> R {
        // Clone the Arc out so the map shard is not held while waiting
        let lock = self.locks.entry(feed_id).or_default().clone();
        let result = {
            let _guard = lock.lock();
            f()
        };
        drop(lock);

        // Clones are only taken under the shard lock, so a count of 1 means
        // no caller holds or waits on this entry
        self.locks
            .remove_if(&feed_id, |_, entry| Arc::strong_count(entry) == 1);
        result
    }

    /// Number of feeds currently locked or awaited
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_with_lock_returns_closure_result() {
        let locks = FeedLocks::new();
        assert_eq!(locks.with_lock(1, || 41 + 1), 42);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_entry_kept_while_held() {
        let locks = FeedLocks::new();

        locks.with_lock(3, || {
            assert_eq!(locks.len(), 1);
            locks.with_lock(4, || assert_eq!(locks.len(), 2));
            assert_eq!(locks.len(), 1);
        });

        assert!(locks.is_empty());
    }

    #[test]
    fn test_same_feed_is_serialized() {
        let locks = FeedLocks::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let max_inside = max_inside.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        locks.with_lock(7, || {
                            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                            max_inside.fetch_max(now, Ordering::SeqCst);
                            thread::yield_now();
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }
}
