// Source trait for on-demand dashboard refreshes
use crate::domain::dashboard::DashboardSnapshot;
use async_trait::async_trait;

/// Changes a single refresh round trip brings back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshDelta {
    pub transaction_increment: u64,
    pub health_nudge: f64,
}

impl RefreshDelta {
    pub fn apply(&self, snapshot: &mut DashboardSnapshot) {
        let kpi = snapshot.kpi_mut();
        kpi.total_transactions = kpi.total_transactions.saturating_add(self.transaction_increment);
        // Bounds are re-applied by the store.
        kpi.system_health += self.health_nudge;
    }
}

#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch the latest changes. May suspend for the duration of the round trip.
    async fn fetch_refresh(&self) -> anyhow::Result<RefreshDelta>;
}
