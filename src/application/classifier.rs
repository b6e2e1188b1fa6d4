// Activity classifier - Maps domain enums to icon and color tokens
use crate::domain::activity::{ActivityCategory, ActivityStatus};
use crate::domain::dashboard::TrendDirection;
use crate::domain::health::ServiceStatus;
use serde::Serialize;

pub const UNKNOWN_ICON: &str = "help-circle";
pub const NEUTRAL_COLOR: &str = "text-gray-500";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayTreatment {
    pub icon: &'static str,
    pub color: &'static str,
}

pub fn category_icon(category: ActivityCategory) -> &'static str {
    match category {
        ActivityCategory::Transaction => "credit-card",
        ActivityCategory::System => "server",
        ActivityCategory::Alert => "alert-triangle",
        ActivityCategory::Approval => "check-circle",
        ActivityCategory::Maintenance => "wrench",
        ActivityCategory::Unknown => UNKNOWN_ICON,
    }
}

pub fn status_color(status: ActivityStatus) -> &'static str {
    match status {
        ActivityStatus::Success => "text-green-600",
        ActivityStatus::Warning => "text-yellow-600",
        ActivityStatus::Info => "text-blue-600",
        ActivityStatus::Error => "text-red-600",
        ActivityStatus::Unknown => NEUTRAL_COLOR,
    }
}

pub fn classify_activity(category: ActivityCategory, status: ActivityStatus) -> DisplayTreatment {
    DisplayTreatment {
        icon: category_icon(category),
        color: status_color(status),
    }
}

pub fn service_treatment(status: ServiceStatus) -> DisplayTreatment {
    match status {
        ServiceStatus::Operational => DisplayTreatment {
            icon: "check-circle",
            color: "text-green-600",
        },
        ServiceStatus::Degraded => DisplayTreatment {
            icon: "alert-triangle",
            color: "text-yellow-600",
        },
        ServiceStatus::Down => DisplayTreatment {
            icon: "x-circle",
            color: "text-red-600",
        },
        ServiceStatus::Unknown => DisplayTreatment {
            icon: UNKNOWN_ICON,
            color: NEUTRAL_COLOR,
        },
    }
}

pub fn trend_color(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "text-green-600",
        TrendDirection::Down => "text-red-600",
        TrendDirection::Flat => NEUTRAL_COLOR,
    }
}

/// Icon for a KPI card, keyed by metric name.
pub fn metric_icon(metric: &str) -> &'static str {
    match metric {
        "total_transactions" => "activity",
        "pending_documents" => "file-text",
        "system_health" => "heart-pulse",
        "active_users" => "users",
        "processed_today" => "check-square",
        "revenue_today" => "dollar-sign",
        _ => UNKNOWN_ICON,
    }
}

/// Severity band for a resource gauge.
pub fn gauge_level(value: f64) -> &'static str {
    if value >= 90.0 {
        "critical"
    } else if value >= 70.0 {
        "elevated"
    } else {
        "normal"
    }
}
