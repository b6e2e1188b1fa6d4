// Render model - Display-ready view of a dashboard snapshot
use crate::application::classifier::{
    classify_activity, gauge_level, metric_icon, service_treatment, trend_color, DisplayTreatment,
};
use crate::application::formatter::{
    format_compact, format_count, format_currency, format_duration_secs, format_percent,
};
use crate::application::navigation::{QuickAction, QUICK_ACTIONS};
use crate::application::polling::LoadPhase;
use crate::application::session::DashboardSession;
use crate::domain::charts::{LocationPerformance, MonthlyVolume};
use crate::domain::dashboard::{DashboardSnapshot, Trend, TrendDirection};
use crate::domain::health::{Service, ServiceStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub session_id: Uuid,
    pub phase: LoadPhase,
    /// Blocking overlay while a refresh is in flight.
    pub refreshing: bool,
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
    pub kpis: Vec<KpiCard>,
    pub charts: ChartsView,
    pub activity: Vec<ActivityItem>,
    pub health: HealthPanel,
    pub quick_actions: &'static [QuickAction],
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiCard {
    pub metric: &'static str,
    pub label: &'static str,
    pub value: String,
    pub trend: String,
    pub direction: TrendDirection,
    pub trend_color: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartsView {
    pub monthly_volume: Vec<MonthlyVolume>,
    pub location_performance: Vec<LocationPerformance>,
    pub document_types: Vec<DocumentTypeRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentTypeRow {
    pub document_type: String,
    pub processed: u64,
    pub pending: u64,
    pub processed_label: String,
    pub avg_processing: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub time_ago: String,
    pub module: String,
    #[serde(flatten)]
    pub treatment: DisplayTreatment,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthPanel {
    pub services: Vec<ServiceRow>,
    pub gauges: Vec<GaugeRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceRow {
    pub service: Service,
    pub label: &'static str,
    pub status: ServiceStatus,
    #[serde(flatten)]
    pub treatment: DisplayTreatment,
}

#[derive(Debug, Clone, Serialize)]
pub struct GaugeRow {
    pub name: &'static str,
    pub value: f64,
    pub display: String,
    pub level: &'static str,
}

impl DashboardView {
    pub fn of_session(session: &DashboardSession) -> Self {
        Self::render(
            session.id(),
            &session.snapshot(),
            session.phase(),
            session.refresh().is_refreshing(),
        )
    }

    pub fn render(
        session_id: Uuid,
        snapshot: &DashboardSnapshot,
        phase: LoadPhase,
        refreshing: bool,
    ) -> Self {
        Self {
            session_id,
            phase,
            refreshing,
            revision: snapshot.revision,
            updated_at: snapshot.updated_at,
            kpis: render_kpis(snapshot),
            charts: render_charts(snapshot),
            activity: snapshot
                .activity()
                .iter()
                .map(|a| ActivityItem {
                    id: a.id,
                    title: a.title.clone(),
                    description: a.description.clone(),
                    time_ago: a.time_ago.clone(),
                    module: a.module.clone(),
                    treatment: classify_activity(a.category, a.status),
                })
                .collect(),
            health: render_health(snapshot),
            quick_actions: &QUICK_ACTIONS,
        }
    }
}

fn card(metric: &'static str, label: &'static str, value: String, trend: &Trend) -> KpiCard {
    let direction = trend.direction();
    KpiCard {
        metric,
        label,
        value,
        trend: trend.as_str().to_string(),
        direction,
        trend_color: trend_color(direction),
        icon: metric_icon(metric),
    }
}

fn render_kpis(snapshot: &DashboardSnapshot) -> Vec<KpiCard> {
    let trends = snapshot.trends();
    vec![
        card(
            "total_transactions",
            "Total Transactions",
            format_count(snapshot.total_transactions()),
            &trends.transactions,
        ),
        card(
            "pending_documents",
            "Pending Documents",
            format_count(snapshot.pending_documents()),
            &trends.pending_documents,
        ),
        card(
            "system_health",
            "System Health",
            format_percent(snapshot.system_health()),
            &trends.system_health,
        ),
        card(
            "active_users",
            "Active Users",
            format_count(snapshot.active_users()),
            &trends.active_users,
        ),
        card(
            "processed_today",
            "Processed Today",
            format_count(snapshot.processed_today()),
            &trends.processed_today,
        ),
        card(
            "revenue_today",
            "Revenue Today",
            format_currency(snapshot.revenue_today()),
            &trends.revenue_today,
        ),
    ]
}

fn render_charts(snapshot: &DashboardSnapshot) -> ChartsView {
    ChartsView {
        monthly_volume: snapshot.monthly_volume().to_vec(),
        location_performance: snapshot.location_performance().to_vec(),
        document_types: snapshot
            .document_types()
            .iter()
            .map(|d| DocumentTypeRow {
                document_type: d.document_type.clone(),
                processed: d.processed,
                pending: d.pending,
                processed_label: format_compact(d.processed),
                avg_processing: format_duration_secs(d.avg_processing_secs),
            })
            .collect(),
    }
}

fn render_health(snapshot: &DashboardSnapshot) -> HealthPanel {
    let services = Service::ALL
        .iter()
        .map(|&service| {
            let status = snapshot.service_status(service);
            ServiceRow {
                service,
                label: service.label(),
                status,
                treatment: service_treatment(status),
            }
        })
        .collect();

    let gauges = [
        ("cpu", snapshot.cpu_usage()),
        ("memory", snapshot.memory_usage()),
        ("disk", snapshot.disk_usage()),
    ]
    .into_iter()
    .map(|(name, value)| GaugeRow {
        name,
        value,
        display: format_percent(value),
        level: gauge_level(value),
    })
    .collect();

    HealthPanel { services, gauges }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_seed() {
        let snapshot = DashboardSnapshot::seed(Utc::now());
        let view = DashboardView::render(Uuid::nil(), &snapshot, LoadPhase::Ready, false);

        assert_eq!(view.kpis.len(), 6);
        assert_eq!(view.kpis[0].value, "15,847");
        assert_eq!(view.kpis[0].direction, TrendDirection::Up);
        assert_eq!(view.kpis[1].direction, TrendDirection::Down);
        assert_eq!(view.kpis[2].value, "98.7%");
        assert_eq!(view.kpis[5].value, "$284,750.00");

        assert_eq!(view.activity.len(), 6);
        assert_eq!(view.activity[0].treatment.icon, "credit-card");
        assert_eq!(view.charts.document_types[0].avg_processing, "4.2s");

        let storage = &view.health.services[2];
        assert_eq!(storage.status, ServiceStatus::Degraded);
        assert_eq!(storage.treatment.color, "text-yellow-600");
        assert_eq!(view.health.gauges[1].display, "67.8%");
    }

    #[test]
    fn test_render_partial_snapshot() {
        let view = DashboardView::render(
            Uuid::nil(),
            &DashboardSnapshot::default(),
            LoadPhase::Loading,
            true,
        );

        assert!(view.refreshing);
        assert_eq!(view.kpis[0].value, "0");
        assert_eq!(view.kpis[0].direction, TrendDirection::Flat);
        assert!(view.activity.is_empty());
        assert!(view.charts.monthly_volume.is_empty());
        assert!(view.health.services.iter().all(|s| s.status == ServiceStatus::Unknown));
        assert!(view.health.gauges.iter().all(|g| g.level == "normal"));
    }

    #[test]
    fn test_view_serializes_flat_treatments() {
        let snapshot = DashboardSnapshot::seed(Utc::now());
        let view = DashboardView::render(Uuid::nil(), &snapshot, LoadPhase::Ready, false);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["phase"], "ready");
        assert_eq!(json["activity"][2]["icon"], "alert-triangle");
        assert_eq!(json["health"]["services"][0]["status"], "operational");
        assert_eq!(json["quick_actions"][4]["route"], "/reports/export");
    }
}
