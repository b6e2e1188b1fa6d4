// Chart data domain models
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub transactions: u64,
    pub documents: u64,
}

impl MonthlyVolume {
    pub fn new(month: &str, transactions: u64, documents: u64) -> Self {
        Self {
            month: month.to_string(),
            transactions,
            documents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPerformance {
    pub location: String,
    pub efficiency: f64,
    pub volume: u64,
}

impl LocationPerformance {
    pub fn new(location: &str, efficiency: f64, volume: u64) -> Self {
        Self {
            location: location.to_string(),
            efficiency,
            volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTypeStats {
    pub document_type: String,
    pub processed: u64,
    pub pending: u64,
    pub avg_processing_secs: f64,
}

impl DocumentTypeStats {
    pub fn new(document_type: &str, processed: u64, pending: u64, avg_processing_secs: f64) -> Self {
        Self {
            document_type: document_type.to_string(),
            processed,
            pending,
            avg_processing_secs,
        }
    }
}

/// The three independent chart series shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSection {
    pub monthly_volume: Vec<MonthlyVolume>,
    pub location_performance: Vec<LocationPerformance>,
    pub document_types: Vec<DocumentTypeStats>,
}
