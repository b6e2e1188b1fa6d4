// Dashboard snapshot domain model
use super::activity::{ActivityCategory, ActivityRecord, ActivityStatus};
use super::charts::{ChartSection, DocumentTypeStats, LocationPerformance, MonthlyVolume};
use super::health::{clamp_percent, Gauge, HealthSection, Service, ServiceStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Signed percentage describing change since the previous period, e.g. "+12.5%".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trend(String);

impl Trend {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn direction(&self) -> TrendDirection {
        let numeric = self.0.trim_end_matches('%').trim();
        match numeric.parse::<f64>() {
            Ok(v) if v > 0.0 => TrendDirection::Up,
            Ok(v) if v < 0.0 => TrendDirection::Down,
            _ => TrendDirection::Flat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KpiTrends {
    pub transactions: Trend,
    pub pending_documents: Trend,
    pub system_health: Trend,
    pub active_users: Trend,
    pub processed_today: Trend,
    pub revenue_today: Trend,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KpiSection {
    pub total_transactions: u64,
    pub pending_documents: u64,
    pub system_health: f64,
    pub active_users: u64,
    pub processed_today: u64,
    pub revenue_today: f64,
    pub trends: KpiTrends,
}

/// All dashboard metrics at one point in time.
///
/// Sections are reference counted so that a new snapshot only copies the
/// section an update actually touches. Any section may be absent; the
/// accessors below fall back to zero, empty or `Unknown`.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub kpi: Option<Arc<KpiSection>>,
    pub charts: Option<Arc<ChartSection>>,
    pub activity: Option<Arc<Vec<ActivityRecord>>>,
    pub health: Option<Arc<HealthSection>>,
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn total_transactions(&self) -> u64 {
        self.kpi.as_ref().map(|k| k.total_transactions).unwrap_or(0)
    }

    pub fn pending_documents(&self) -> u64 {
        self.kpi.as_ref().map(|k| k.pending_documents).unwrap_or(0)
    }

    pub fn system_health(&self) -> f64 {
        self.kpi.as_ref().map(|k| k.system_health).unwrap_or(0.0)
    }

    pub fn active_users(&self) -> u64 {
        self.kpi.as_ref().map(|k| k.active_users).unwrap_or(0)
    }

    pub fn processed_today(&self) -> u64 {
        self.kpi.as_ref().map(|k| k.processed_today).unwrap_or(0)
    }

    pub fn revenue_today(&self) -> f64 {
        self.kpi.as_ref().map(|k| k.revenue_today).unwrap_or(0.0)
    }

    pub fn trends(&self) -> KpiTrends {
        self.kpi.as_ref().map(|k| k.trends.clone()).unwrap_or_default()
    }

    pub fn monthly_volume(&self) -> &[MonthlyVolume] {
        self.charts.as_deref().map(|c| c.monthly_volume.as_slice()).unwrap_or(&[])
    }

    pub fn location_performance(&self) -> &[LocationPerformance] {
        self.charts
            .as_deref()
            .map(|c| c.location_performance.as_slice())
            .unwrap_or(&[])
    }

    pub fn document_types(&self) -> &[DocumentTypeStats] {
        self.charts.as_deref().map(|c| c.document_types.as_slice()).unwrap_or(&[])
    }

    pub fn activity(&self) -> &[ActivityRecord] {
        self.activity.as_deref().map(|a| a.as_slice()).unwrap_or(&[])
    }

    pub fn service_status(&self, service: Service) -> ServiceStatus {
        self.health
            .as_ref()
            .map(|h| h.status(service))
            .unwrap_or(ServiceStatus::Unknown)
    }

    pub fn cpu_usage(&self) -> f64 {
        self.health.as_ref().map(|h| h.cpu.value()).unwrap_or(0.0)
    }

    pub fn memory_usage(&self) -> f64 {
        self.health.as_ref().map(|h| h.memory.value()).unwrap_or(0.0)
    }

    pub fn disk_usage(&self) -> f64 {
        self.health.as_ref().map(|h| h.disk.value()).unwrap_or(0.0)
    }

    /// Mutable access to the KPI section, copying it only if it is shared.
    pub fn kpi_mut(&mut self) -> &mut KpiSection {
        Arc::make_mut(self.kpi.get_or_insert_with(Default::default))
    }

    /// Re-apply value bounds. Gauges bound themselves on construction, so
    /// only `system_health` needs checking here.
    pub fn clamp(&mut self) {
        let health_out_of_range = self
            .kpi
            .as_ref()
            .is_some_and(|k| clamp_percent(k.system_health) != k.system_health);
        if health_out_of_range {
            let kpi = self.kpi_mut();
            kpi.system_health = clamp_percent(kpi.system_health);
        }
    }

    /// Seed values shown when a dashboard is first displayed.
    pub fn seed(now: DateTime<Utc>) -> Self {
        let kpi = KpiSection {
            total_transactions: 15847,
            pending_documents: 342,
            system_health: 98.7,
            active_users: 1247,
            processed_today: 2891,
            revenue_today: 284_750.0,
            trends: KpiTrends {
                transactions: Trend::new("+12.5%"),
                pending_documents: Trend::new("-8.2%"),
                system_health: Trend::new("+0.3%"),
                active_users: Trend::new("+5.7%"),
                processed_today: Trend::new("+18.2%"),
                revenue_today: Trend::new("+9.4%"),
            },
        };

        let charts = ChartSection {
            monthly_volume: vec![
                MonthlyVolume::new("Jan", 12400, 3200),
                MonthlyVolume::new("Feb", 13100, 3550),
                MonthlyVolume::new("Mar", 14800, 3900),
                MonthlyVolume::new("Apr", 13900, 3700),
                MonthlyVolume::new("May", 15200, 4100),
                MonthlyVolume::new("Jun", 15847, 4380),
            ],
            location_performance: vec![
                LocationPerformance::new("Headquarters", 96.4, 5820),
                LocationPerformance::new("North Branch", 91.2, 3410),
                LocationPerformance::new("South Branch", 88.7, 2975),
                LocationPerformance::new("East Warehouse", 93.5, 2160),
                LocationPerformance::new("West Office", 85.1, 1482),
            ],
            document_types: vec![
                DocumentTypeStats::new("Invoices", 1245, 87, 4.2),
                DocumentTypeStats::new("Purchase Orders", 892, 64, 6.8),
                DocumentTypeStats::new("Contracts", 234, 41, 18.5),
                DocumentTypeStats::new("Receipts", 2103, 112, 2.1),
                DocumentTypeStats::new("Delivery Notes", 567, 38, 3.6),
            ],
        };

        let activity = vec![
            ActivityRecord::new(
                1,
                ActivityCategory::Transaction,
                ActivityStatus::Success,
                "Payment batch processed",
                "248 vendor payments cleared for settlement",
                "2 minutes ago",
                "Finance",
            ),
            ActivityRecord::new(
                2,
                ActivityCategory::Approval,
                ActivityStatus::Info,
                "Purchase order awaiting approval",
                "PO-20931 requires sign-off from procurement",
                "8 minutes ago",
                "Procurement",
            ),
            ActivityRecord::new(
                3,
                ActivityCategory::Alert,
                ActivityStatus::Warning,
                "Storage usage above threshold",
                "Document archive volume reached 85% capacity",
                "15 minutes ago",
                "Infrastructure",
            ),
            ActivityRecord::new(
                4,
                ActivityCategory::System,
                ActivityStatus::Success,
                "Nightly sync completed",
                "Master data synchronised across all locations",
                "1 hour ago",
                "Integration",
            ),
            ActivityRecord::new(
                5,
                ActivityCategory::Transaction,
                ActivityStatus::Error,
                "Invoice import failed",
                "3 invoices rejected due to missing tax identifiers",
                "2 hours ago",
                "Accounts Payable",
            ),
            ActivityRecord::new(
                6,
                ActivityCategory::Maintenance,
                ActivityStatus::Info,
                "Scheduled maintenance window",
                "Reporting service will restart at 02:00 UTC",
                "3 hours ago",
                "Operations",
            ),
        ];

        let health = HealthSection {
            api: ServiceStatus::Operational,
            database: ServiceStatus::Operational,
            storage: ServiceStatus::Degraded,
            queue: ServiceStatus::Operational,
            cpu: Gauge::new(45.2),
            memory: Gauge::new(67.8),
            disk: Gauge::new(34.1),
        };

        Self {
            kpi: Some(Arc::new(kpi)),
            charts: Some(Arc::new(charts)),
            activity: Some(Arc::new(activity)),
            health: Some(Arc::new(health)),
            revision: 0,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_direction() {
        assert_eq!(Trend::new("+12.5%").direction(), TrendDirection::Up);
        assert_eq!(Trend::new("-8.2%").direction(), TrendDirection::Down);
        assert_eq!(Trend::new("0%").direction(), TrendDirection::Flat);
        assert_eq!(Trend::new("n/a").direction(), TrendDirection::Flat);
    }

    #[test]
    fn test_empty_snapshot_reads_defaults() {
        let snapshot = DashboardSnapshot::default();
        assert_eq!(snapshot.total_transactions(), 0);
        assert_eq!(snapshot.pending_documents(), 0);
        assert_eq!(snapshot.system_health(), 0.0);
        assert!(snapshot.activity().is_empty());
        assert!(snapshot.monthly_volume().is_empty());
        assert_eq!(snapshot.service_status(Service::Database), ServiceStatus::Unknown);
        assert_eq!(snapshot.disk_usage(), 0.0);
    }

    #[test]
    fn test_kpi_mut_copies_only_kpi() {
        let seed = DashboardSnapshot::seed(Utc::now());
        let mut next = seed.clone();
        next.kpi_mut().total_transactions += 1;

        assert_eq!(seed.total_transactions(), 15847);
        assert_eq!(next.total_transactions(), 15848);
        assert!(!Arc::ptr_eq(seed.kpi.as_ref().unwrap(), next.kpi.as_ref().unwrap()));
        assert!(Arc::ptr_eq(seed.charts.as_ref().unwrap(), next.charts.as_ref().unwrap()));
        assert!(Arc::ptr_eq(seed.activity.as_ref().unwrap(), next.activity.as_ref().unwrap()));
        assert!(Arc::ptr_eq(seed.health.as_ref().unwrap(), next.health.as_ref().unwrap()));
    }

    #[test]
    fn test_clamp_bounds_system_health() {
        let mut snapshot = DashboardSnapshot::seed(Utc::now());
        snapshot.kpi_mut().system_health = 104.0;
        snapshot.clamp();

        assert_eq!(snapshot.system_health(), 100.0);
        assert_eq!(snapshot.cpu_usage(), 45.2);
        assert_eq!(snapshot.memory_usage(), 67.8);
    }

    #[test]
    fn test_clamp_leaves_in_range_sections_shared() {
        let seed = DashboardSnapshot::seed(Utc::now());
        let mut next = seed.clone();
        next.clamp();
        assert!(Arc::ptr_eq(seed.kpi.as_ref().unwrap(), next.kpi.as_ref().unwrap()));
        assert!(Arc::ptr_eq(seed.health.as_ref().unwrap(), next.health.as_ref().unwrap()));
    }
}
