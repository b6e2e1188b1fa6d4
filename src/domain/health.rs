// System health domain model
use serde::Serialize;

pub const GAUGE_MIN: f64 = 0.0;
pub const GAUGE_MAX: f64 = 100.0;

/// Clamp a percentage-like value into [0, 100]. NaN collapses to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return GAUGE_MIN;
    }
    value.clamp(GAUGE_MIN, GAUGE_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Operational,
    Degraded,
    Down,
    #[default]
    Unknown,
}

impl ServiceStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "operational" | "online" | "healthy" => Self::Operational,
            "degraded" | "warning" => Self::Degraded,
            "down" | "offline" => Self::Down,
            _ => Self::Unknown,
        }
    }
}

/// Named services reported on the health panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Api,
    Database,
    Storage,
    Queue,
}

impl Service {
    pub const ALL: [Service; 4] = [Service::Api, Service::Database, Service::Storage, Service::Queue];

    pub fn label(&self) -> &'static str {
        match self {
            Service::Api => "API Gateway",
            Service::Database => "Database",
            Service::Storage => "Document Storage",
            Service::Queue => "Processing Queue",
        }
    }
}

/// Resource usage gauge kept in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Gauge(f64);

impl Gauge {
    pub fn new(value: f64) -> Self {
        Self(clamp_percent(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthSection {
    pub api: ServiceStatus,
    pub database: ServiceStatus,
    pub storage: ServiceStatus,
    pub queue: ServiceStatus,
    pub cpu: Gauge,
    pub memory: Gauge,
    pub disk: Gauge,
}

impl HealthSection {
    pub fn status(&self, service: Service) -> ServiceStatus {
        match service {
            Service::Api => self.api,
            Service::Database => self.database,
            Service::Storage => self.storage,
            Service::Queue => self.queue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(101.3), 100.0);
        assert_eq!(clamp_percent(-0.5), 0.0);
        assert_eq!(clamp_percent(42.5), 42.5);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_gauge_is_bounded() {
        assert_eq!(Gauge::new(250.0).value(), 100.0);
        assert_eq!(Gauge::new(-3.0).value(), 0.0);
    }

    #[test]
    fn test_parse_service_status() {
        assert_eq!(ServiceStatus::parse("online"), ServiceStatus::Operational);
        assert_eq!(ServiceStatus::parse("Degraded"), ServiceStatus::Degraded);
        assert_eq!(ServiceStatus::parse("???"), ServiceStatus::Unknown);
    }
}
