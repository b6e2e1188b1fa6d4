// Dashboard sessions - One store, one set of timers and one refresh command per mounted view
use crate::application::metrics_source::MetricsSource;
use crate::application::polling::{LoadPhase, PollingController, PollingHandle};
use crate::application::random::RandomSource;
use crate::application::refresh::RefreshCommand;
use crate::application::store::DashboardStateStore;
use crate::domain::dashboard::DashboardSnapshot;
use crate::infrastructure::config::TimingSettings;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub struct DashboardSession {
    id: Uuid,
    mounted_at: DateTime<Utc>,
    store: Arc<DashboardStateStore>,
    polling: PollingHandle,
    refresh: RefreshCommand,
    clock: Instant,
    // Milliseconds after `clock` of the last request or viewer departure.
    last_seen_ms: AtomicU64,
    viewers: AtomicUsize,
}

impl DashboardSession {
    /// Seed a fresh store and start its timers. Must be called inside a tokio runtime.
    pub fn mount(id: Uuid, polling: &PollingController, source: Arc<dyn MetricsSource>) -> Self {
        let mounted_at = Utc::now();
        let store = Arc::new(DashboardStateStore::new(DashboardSnapshot::seed(mounted_at)));
        let handle = polling.start(store.clone());
        let refresh = RefreshCommand::new(store.clone(), source);

        tracing::info!(session = %id, "Dashboard session mounted");

        Self {
            id,
            mounted_at,
            store,
            polling: handle,
            refresh,
            clock: Instant::now(),
            last_seen_ms: AtomicU64::new(0),
            viewers: AtomicUsize::new(0),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mounted_at(&self) -> DateTime<Utc> {
        self.mounted_at
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.store.snapshot()
    }

    pub fn phase(&self) -> LoadPhase {
        self.polling.phase()
    }

    pub fn refresh(&self) -> &RefreshCommand {
        &self.refresh
    }

    pub fn is_torn_down(&self) -> bool {
        self.store.is_disposed()
    }

    /// Receivers for everything a renderer reacts to.
    pub fn watch(&self) -> SessionWatch {
        SessionWatch {
            snapshot: self.store.subscribe(),
            phase: self.polling.subscribe_phase(),
            refreshing: self.refresh.subscribe(),
        }
    }

    /// Record activity so the idle sweep leaves this session alone.
    pub fn touch(&self) {
        let now = self.clock.elapsed().as_millis() as u64;
        self.last_seen_ms.fetch_max(now, Ordering::Relaxed);
    }

    pub fn idle_for(&self) -> Duration {
        let last_seen = Duration::from_millis(self.last_seen_ms.load(Ordering::Relaxed));
        self.clock.elapsed().saturating_sub(last_seen)
    }

    /// Register an open view stream. The session is never idle while one is held.
    pub fn attach_viewer(&self) -> ViewerGuard<'_> {
        self.viewers.fetch_add(1, Ordering::AcqRel);
        self.touch();
        ViewerGuard { session: self }
    }

    pub fn viewers(&self) -> usize {
        self.viewers.load(Ordering::Acquire)
    }

    pub fn is_idle(&self, timeout: Duration) -> bool {
        self.viewers() == 0 && self.idle_for() >= timeout
    }

    /// Release the timers and dispose the store. Idempotent.
    pub fn teardown(&self) {
        self.polling.cancel();
        if self.store.dispose() {
            tracing::info!(session = %self.id, "Dashboard session torn down");
        }
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

pub struct ViewerGuard<'a> {
    session: &'a DashboardSession,
}

impl Drop for ViewerGuard<'_> {
    fn drop(&mut self) {
        self.session.touch();
        self.session.viewers.fetch_sub(1, Ordering::AcqRel);
    }
}

pub struct SessionWatch {
    pub snapshot: watch::Receiver<Arc<DashboardSnapshot>>,
    pub phase: watch::Receiver<LoadPhase>,
    pub refreshing: watch::Receiver<bool>,
}

impl SessionWatch {
    /// Wait until anything observable changes. Returns `false` once a
    /// sender is gone, which only happens after the session is dropped.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            res = self.snapshot.changed() => res.is_ok(),
            res = self.phase.changed() => res.is_ok(),
            res = self.refreshing.changed() => res.is_ok(),
        }
    }
}

/// Mounted sessions keyed by id.
pub struct SessionRegistry {
    polling: PollingController,
    source: Arc<dyn MetricsSource>,
    idle_timeout: Duration,
    sessions: RwLock<HashMap<Uuid, Arc<DashboardSession>>>,
}

impl SessionRegistry {
    pub fn new(
        timing: &TimingSettings,
        random: Arc<dyn RandomSource>,
        source: Arc<dyn MetricsSource>,
    ) -> Self {
        Self {
            polling: PollingController::new(timing, random),
            source,
            idle_timeout: timing.session_idle_timeout(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn mount(&self) -> Arc<DashboardSession> {
        let session = Arc::new(DashboardSession::mount(
            Uuid::new_v4(),
            &self.polling,
            self.source.clone(),
        ));
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        session
    }

    /// Look up a session and mark it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<Arc<DashboardSession>> {
        let session = self.sessions.read().await.get(&id).cloned()?;
        session.touch();
        Some(session)
    }

    /// Remove and tear down a session. `None` if it was not mounted.
    pub async fn teardown(&self, id: Uuid) -> Option<Arc<DashboardSession>> {
        let session = self.sessions.write().await.remove(&id)?;
        session.teardown();
        Some(session)
    }

    pub async fn teardown_all(&self) {
        let sessions: Vec<_> = self.sessions.write().await.drain().map(|(_, s)| s).collect();
        for session in &sessions {
            session.teardown();
        }
        if !sessions.is_empty() {
            tracing::info!("Tore down {} dashboard sessions", sessions.len());
        }
    }

    /// Tear down every session with no open stream that has gone unused for
    /// the idle timeout. Returns how many were reclaimed.
    pub async fn reclaim_idle(&self) -> usize {
        let reclaimed: Vec<_> = {
            let mut sessions = self.sessions.write().await;
            let idle: Vec<Uuid> = sessions
                .values()
                .filter(|s| s.is_idle(self.idle_timeout))
                .map(|s| s.id())
                .collect();
            idle.iter().filter_map(|id| sessions.remove(id)).collect()
        };

        for session in &reclaimed {
            tracing::info!(
                session = %session.id(),
                idle_secs = session.idle_for().as_secs(),
                "Reclaiming abandoned dashboard session"
            );
            session.teardown();
        }
        reclaimed.len()
    }

    /// Periodically reclaim idle sessions until `token` is cancelled.
    pub async fn run_idle_sweep(&self, token: CancellationToken) {
        let period = (self.idle_timeout / 2).max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    self.reclaim_idle().await;
                }
            }
        }
        tracing::debug!("Idle session sweep stopped");
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::random::ScriptedRandom;
    use crate::application::refresh::RefreshOutcome;
    use crate::infrastructure::simulated_source::SimulatedMetricsSource;
    use std::time::Duration;

    fn registry() -> SessionRegistry {
        let timing = TimingSettings::default();
        let random: Arc<dyn RandomSource> = Arc::new(ScriptedRandom::new([3, -1, 4, 10]));
        let source = Arc::new(SimulatedMetricsSource::new(timing.refresh_delay(), random.clone()));
        SessionRegistry::new(&timing, random, source)
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_seeds_and_starts_loading() {
        let registry = registry();
        let session = registry.mount().await;

        assert_eq!(registry.len().await, 1);
        assert_eq!(session.phase(), LoadPhase::Loading);
        assert_eq!(session.snapshot().total_transactions(), 15847);

        tokio::time::sleep(Duration::from_millis(1_600)).await;
        assert_eq!(session.phase(), LoadPhase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_stops_mutation() {
        let registry = registry();
        let session = registry.mount().await;
        let id = session.id();

        assert!(registry.teardown(id).await.is_some());
        assert!(registry.teardown(id).await.is_none());
        assert!(registry.get(id).await.is_none());
        assert!(session.is_torn_down());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(session.snapshot().revision, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_in_flight_at_teardown_is_discarded() {
        let registry = registry();
        let session = registry.mount().await;

        let ticket = session.refresh().try_begin().unwrap();
        let pending = tokio::spawn(ticket.execute());

        tokio::time::sleep(Duration::from_millis(500)).await;
        registry.teardown(session.id()).await;

        assert_eq!(pending.await.unwrap(), RefreshOutcome::Discarded);
        assert!(!session.refresh().is_refreshing());
        assert_eq!(session.snapshot().revision, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_reports_changes_and_teardown() {
        let registry = registry();
        let session = registry.mount().await;
        let mut watch = session.watch();

        assert!(watch.changed().await);
        assert_eq!(*watch.phase.borrow_and_update(), LoadPhase::Ready);

        assert!(watch.changed().await);
        assert_eq!(watch.snapshot.borrow_and_update().total_transactions(), 15850);

        registry.teardown(session.id()).await;
        assert!(watch.changed().await);
        assert!(session.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_session_is_reclaimed() {
        let registry = registry();
        let session = registry.mount().await;

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert_eq!(registry.reclaim_idle().await, 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(registry.reclaim_idle().await, 1);
        assert_eq!(registry.len().await, 0);
        assert!(session.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_keep_session_alive() {
        let registry = registry();
        let session = registry.mount().await;

        tokio::time::sleep(Duration::from_secs(200)).await;
        assert!(registry.get(session.id()).await.is_some());
        tokio::time::sleep(Duration::from_secs(200)).await;

        assert_eq!(registry.reclaim_idle().await, 0);
        assert!(!session.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_viewer_blocks_reclaim_until_dropped() {
        let registry = registry();
        let session = registry.mount().await;

        let viewer = session.attach_viewer();
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(registry.reclaim_idle().await, 0);

        drop(viewer);
        assert_eq!(session.viewers(), 0);
        assert_eq!(registry.reclaim_idle().await, 0);

        tokio::time::sleep(Duration::from_secs(301)).await;
        assert_eq!(registry.reclaim_idle().await, 1);
        assert!(session.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sweep_runs_until_cancelled() {
        let registry = Arc::new(registry());
        let token = CancellationToken::new();
        let sweep = tokio::spawn({
            let registry = registry.clone();
            let token = token.clone();
            async move { registry.run_idle_sweep(token).await }
        });

        let session = registry.mount().await;
        tokio::time::sleep(Duration::from_secs(451)).await;
        assert_eq!(registry.len().await, 0);
        assert!(session.is_torn_down());

        token.cancel();
        sweep.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_all_empties_registry() {
        let registry = registry();
        let a = registry.mount().await;
        let b = registry.mount().await;
        assert_ne!(a.id(), b.id());

        registry.teardown_all().await;
        assert_eq!(registry.len().await, 0);
        assert!(a.is_torn_down());
        assert!(b.is_torn_down());
    }
}
