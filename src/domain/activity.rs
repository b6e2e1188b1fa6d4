// Activity feed domain model
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Transaction,
    System,
    Alert,
    Approval,
    Maintenance,
    Unknown,
}

impl ActivityCategory {
    /// Lenient parse; anything unrecognised becomes `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "transaction" => Self::Transaction,
            "system" => Self::System,
            "alert" => Self::Alert,
            "approval" => Self::Approval,
            "maintenance" => Self::Maintenance,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Success,
    Warning,
    Info,
    Error,
    Unknown,
}

impl ActivityStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "info" => Self::Info,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }
}

/// A single entry of the activity feed. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub id: u32,
    pub category: ActivityCategory,
    pub status: ActivityStatus,
    pub title: String,
    pub description: String,
    pub time_ago: String,
    pub module: String,
}

impl ActivityRecord {
    pub fn new(
        id: u32,
        category: ActivityCategory,
        status: ActivityStatus,
        title: &str,
        description: &str,
        time_ago: &str,
        module: &str,
    ) -> Self {
        Self {
            id,
            category,
            status,
            title: title.to_string(),
            description: description.to_string(),
            time_ago: time_ago.to_string(),
            module: module.to_string(),
        }
    }
}
