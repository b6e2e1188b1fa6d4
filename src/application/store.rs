// Dashboard state store - Single owner of the current snapshot
use crate::domain::dashboard::DashboardSnapshot;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the snapshot of one dashboard session.
///
/// Writes go through [`DashboardStateStore::update`], which derives a new
/// snapshot from the previous one. Readers get an `Arc` to whatever snapshot
/// was current when they asked and are never affected by later writes.
pub struct DashboardStateStore {
    current: watch::Sender<Arc<DashboardSnapshot>>,
    disposed: AtomicBool,
}

impl DashboardStateStore {
    pub fn new(seed: DashboardSnapshot) -> Self {
        let (current, _) = watch::channel(Arc::new(seed));
        Self {
            current,
            disposed: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.current.borrow().clone()
    }

    /// Apply a partial update to a copy of the current snapshot.
    ///
    /// Sections the closure does not touch stay shared with the previous
    /// snapshot. Bounds are re-applied afterwards. Returns `false` without
    /// running the closure once the store has been disposed.
    pub fn update<F>(&self, apply: F) -> bool
    where
        F: FnOnce(&mut DashboardSnapshot),
    {
        if self.is_disposed() {
            return false;
        }

        self.current.send_if_modified(|current| {
            // Checked again in case dispose raced the fast path.
            if self.disposed.load(Ordering::Acquire) {
                return false;
            }

            let mut next = DashboardSnapshot::clone(current);
            apply(&mut next);
            next.clamp();
            next.revision = current.revision + 1;
            next.updated_at = Utc::now();
            *current = Arc::new(next);
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.current.subscribe()
    }

    /// Mark the store defunct. Returns `true` only for the call that did it.
    pub fn dispose(&self) -> bool {
        let first = !self.disposed.swap(true, Ordering::AcqRel);
        if first {
            // Wake subscribers so they notice the store is gone.
            self.current.send_modify(|_| {});
            tracing::debug!("Dashboard store disposed");
        }
        first
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> DashboardStateStore {
        DashboardStateStore::new(DashboardSnapshot::seed(Utc::now()))
    }

    #[test]
    fn test_update_produces_new_snapshot() {
        let store = seeded();
        let before = store.snapshot();

        assert!(store.update(|s| s.kpi_mut().pending_documents = 10));

        let after = store.snapshot();
        assert_eq!(before.pending_documents(), 342);
        assert_eq!(after.pending_documents(), 10);
        assert_eq!(after.revision, before.revision + 1);
        assert!(Arc::ptr_eq(
            before.activity.as_ref().unwrap(),
            after.activity.as_ref().unwrap()
        ));
    }

    #[test]
    fn test_update_clamps_instead_of_rejecting() {
        let store = seeded();
        assert!(store.update(|s| s.kpi_mut().system_health = 140.0));
        assert_eq!(store.snapshot().system_health(), 100.0);

        assert!(store.update(|s| s.kpi_mut().system_health = -2.0));
        assert_eq!(store.snapshot().system_health(), 0.0);
    }

    #[test]
    fn test_update_on_partial_snapshot_creates_section() {
        let store = DashboardStateStore::new(DashboardSnapshot::default());
        assert!(store.update(|s| s.kpi_mut().total_transactions += 5));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.total_transactions(), 5);
        assert!(snapshot.health.is_none());
    }

    #[test]
    fn test_dispose_is_idempotent_and_blocks_updates() {
        let store = seeded();
        assert!(store.dispose());
        assert!(!store.dispose());

        let revision = store.snapshot().revision;
        assert!(!store.update(|s| s.kpi_mut().total_transactions += 1));
        assert_eq!(store.snapshot().revision, revision);
        assert_eq!(store.snapshot().total_transactions(), 15847);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let store = seeded();
        let mut rx = store.subscribe();

        store.update(|s| s.kpi_mut().total_transactions += 2);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().total_transactions(), 15849);
    }
}
