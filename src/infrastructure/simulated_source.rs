// Simulated metrics source - Stands in for a real back-office data API
use crate::application::metrics_source::{MetricsSource, RefreshDelta};
use crate::application::random::RandomSource;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const MAX_REFRESH_INCREMENT: i64 = 19;
/// Health nudge is drawn in tenths so it keeps the one-decimal display precision.
const HEALTH_NUDGE_TENTHS: i64 = 10;

#[derive(Clone)]
pub struct SimulatedMetricsSource {
    latency: Duration,
    random: Arc<dyn RandomSource>,
}

impl SimulatedMetricsSource {
    pub fn new(latency: Duration, random: Arc<dyn RandomSource>) -> Self {
        Self { latency, random }
    }
}

#[async_trait]
impl MetricsSource for SimulatedMetricsSource {
    async fn fetch_refresh(&self) -> anyhow::Result<RefreshDelta> {
        tokio::time::sleep(self.latency).await;

        let increment = self.random.between(0, MAX_REFRESH_INCREMENT);
        let nudge_tenths = self.random.between(-HEALTH_NUDGE_TENTHS, HEALTH_NUDGE_TENTHS);

        let delta = RefreshDelta {
            transaction_increment: increment.max(0) as u64,
            health_nudge: nudge_tenths as f64 / 10.0,
        };
        tracing::debug!(
            "Simulated refresh after {:?}: +{} transactions, health {:+.1}",
            self.latency,
            delta.transaction_increment,
            delta.health_nudge
        );
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::random::ScriptedRandom;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_then_draws() {
        let source = SimulatedMetricsSource::new(
            Duration::from_secs(2),
            Arc::new(ScriptedRandom::new([7, -10])),
        );

        let started = Instant::now();
        let delta = source.fetch_refresh().await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(delta.transaction_increment, 7);
        assert_eq!(delta.health_nudge, -1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_draws_are_bounded() {
        let source = SimulatedMetricsSource::new(
            Duration::ZERO,
            Arc::new(ScriptedRandom::new([400, 400])),
        );
        let delta = source.fetch_refresh().await.unwrap();
        assert_eq!(delta.transaction_increment, 19);
        assert_eq!(delta.health_nudge, 1.0);
    }
}
