// Polling controller - Loading timer and recurring live-update timer
use crate::application::random::RandomSource;
use crate::application::store::DashboardStateStore;
use crate::domain::dashboard::DashboardSnapshot;
use crate::infrastructure::config::TimingSettings;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const MAX_TICK_INCREMENT: i64 = 4;
pub const PENDING_WALK: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Loading,
    Ready,
}

/// One firing of the live-update timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveTick {
    pub transaction_increment: u64,
    pub pending_walk: i64,
}

impl LiveTick {
    pub fn draw(random: &dyn RandomSource) -> Self {
        let increment = random.between(0, MAX_TICK_INCREMENT);
        let walk = random.between(-PENDING_WALK, PENDING_WALK);
        Self {
            transaction_increment: increment.max(0) as u64,
            pending_walk: walk,
        }
    }

    pub fn apply(&self, snapshot: &mut DashboardSnapshot) {
        let kpi = snapshot.kpi_mut();
        kpi.total_transactions = kpi.total_transactions.saturating_add(self.transaction_increment);
        // Floors at zero.
        kpi.pending_documents = kpi.pending_documents.saturating_add_signed(self.pending_walk);
    }
}

#[derive(Clone)]
pub struct PollingController {
    loading_delay: Duration,
    live_update_interval: Duration,
    random: Arc<dyn RandomSource>,
}

impl PollingController {
    pub fn new(timing: &TimingSettings, random: Arc<dyn RandomSource>) -> Self {
        Self {
            loading_delay: timing.loading_delay(),
            live_update_interval: timing.live_update_interval(),
            random,
        }
    }

    /// Start both timers against `store`. They run until the returned handle
    /// is cancelled or dropped.
    pub fn start(&self, store: Arc<DashboardStateStore>) -> PollingHandle {
        let token = CancellationToken::new();
        let (phase, _) = watch::channel(LoadPhase::Loading);
        let phase = Arc::new(phase);

        let loading = tokio::spawn(run_loading_timer(
            self.loading_delay,
            phase.clone(),
            token.child_token(),
        ));
        let live = tokio::spawn(run_live_updates(
            self.live_update_interval,
            store,
            self.random.clone(),
            token.child_token(),
        ));

        PollingHandle {
            token,
            phase,
            tasks: vec![loading, live],
        }
    }
}

async fn run_loading_timer(
    delay: Duration,
    phase: Arc<watch::Sender<LoadPhase>>,
    token: CancellationToken,
) {
    tokio::select! {
        _ = token.cancelled() => {
            tracing::debug!("Loading timer cancelled before firing");
        }
        _ = tokio::time::sleep(delay) => {
            phase.send_replace(LoadPhase::Ready);
            tracing::debug!("Dashboard ready after {:?}", delay);
        }
    }
}

async fn run_live_updates(
    period: Duration,
    store: Arc<DashboardStateStore>,
    random: Arc<dyn RandomSource>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let tick = LiveTick::draw(random.as_ref());
                if !store.update(|s| tick.apply(s)) {
                    tracing::debug!("Store disposed, stopping live updates");
                    break;
                }
                tracing::trace!(
                    "Live tick: +{} transactions, pending {:+}",
                    tick.transaction_increment,
                    tick.pending_walk
                );
            }
        }
    }
}

/// Owns the running timers of one dashboard view. Dropping it cancels them.
pub struct PollingHandle {
    token: CancellationToken,
    phase: Arc<watch::Sender<LoadPhase>>,
    tasks: Vec<JoinHandle<()>>,
}

impl PollingHandle {
    /// Stop both timers. Safe to call any number of times.
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            self.token.cancel();
            tracing::debug!("Polling timers cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn phase(&self) -> LoadPhase {
        *self.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<LoadPhase> {
        self.phase.subscribe()
    }

    /// Whether both timer tasks have exited.
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(|t| t.is_finished())
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
