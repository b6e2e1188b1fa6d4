// Refresh command - User-triggered refresh, at most one in flight
use crate::application::metrics_source::MetricsSource;
use crate::application::store::DashboardStateStore;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The delta was applied to the store.
    Completed,
    /// Another refresh was already running; nothing happened.
    AlreadyRefreshing,
    /// The source failed; the snapshot is unchanged.
    Failed,
    /// The session was torn down while the refresh was in flight.
    Discarded,
}

#[derive(Clone)]
pub struct RefreshCommand {
    store: Arc<DashboardStateStore>,
    source: Arc<dyn MetricsSource>,
    refreshing: Arc<watch::Sender<bool>>,
}

impl RefreshCommand {
    pub fn new(store: Arc<DashboardStateStore>, source: Arc<dyn MetricsSource>) -> Self {
        let (refreshing, _) = watch::channel(false);
        Self {
            store,
            source,
            refreshing: Arc::new(refreshing),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        *self.refreshing.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.refreshing.subscribe()
    }

    /// Claim the busy flag. Returns `None` if a refresh is already running.
    ///
    /// The claim is synchronous so callers can answer "busy" before any
    /// suspension happens.
    pub fn try_begin(&self) -> Option<RefreshTicket> {
        let claimed = self.refreshing.send_if_modified(|busy| {
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        });

        if !claimed {
            tracing::debug!("Refresh requested while one is in flight, ignoring");
            return None;
        }

        Some(RefreshTicket {
            store: self.store.clone(),
            source: self.source.clone(),
            _busy: BusyGuard {
                flag: self.refreshing.clone(),
            },
        })
    }

    /// Run a full refresh, or do nothing if one is already running.
    pub async fn run(&self) -> RefreshOutcome {
        match self.try_begin() {
            Some(ticket) => ticket.execute().await,
            None => RefreshOutcome::AlreadyRefreshing,
        }
    }
}

/// An acquired refresh. The busy flag is released when this is dropped,
/// whether `execute` finished, failed, or was never awaited.
pub struct RefreshTicket {
    store: Arc<DashboardStateStore>,
    source: Arc<dyn MetricsSource>,
    _busy: BusyGuard,
}

impl RefreshTicket {
    pub async fn execute(self) -> RefreshOutcome {
        let delta = match self.source.fetch_refresh().await {
            Ok(delta) => delta,
            Err(e) => {
                tracing::warn!("Dashboard refresh failed: {:#}", e);
                return RefreshOutcome::Failed;
            }
        };

        if self.store.update(|s| delta.apply(s)) {
            tracing::info!(
                "Dashboard refreshed: +{} transactions, health {:+.1}",
                delta.transaction_increment,
                delta.health_nudge
            );
            RefreshOutcome::Completed
        } else {
            tracing::debug!("Refresh completed after teardown, discarding");
            RefreshOutcome::Discarded
        }
    }
}

struct BusyGuard {
    flag: Arc<watch::Sender<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}
