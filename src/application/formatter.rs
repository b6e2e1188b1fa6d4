// Metric formatting - Display strings for KPI cards and charts
use num_format::{Locale, ToFormattedString};

/// "15847" -> "15,847"
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// One decimal place with a percent sign, e.g. "98.7%".
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Dollar amount with grouped thousands and cents, e.g. "$284,750.00".
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    format!(
        "{}${}.{:02}",
        sign,
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// Short form for chart axes: "15.8K", "1.2M".
///
/// The unit is picked after rounding to one decimal, so 999,950 reads "1.0M".
pub fn format_compact(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }
    let thousands = round_tenths(value as f64 / 1_000.0);
    if thousands < 1_000.0 {
        return format!("{:.1}K", thousands);
    }
    format!("{:.1}M", round_tenths(value as f64 / 1_000_000.0))
}

/// Processing time in seconds, e.g. "4.2s" or "1m 05s". NaN reads as zero.
pub fn format_duration_secs(secs: f64) -> String {
    if secs.is_nan() {
        return "0.0s".to_string();
    }
    let secs = secs.max(0.0);
    let tenths = round_tenths(secs);
    if tenths < 60.0 {
        return format!("{:.1}s", tenths);
    }
    let whole = secs.round() as u64;
    format!("{}m {:02}s", whole / 60, whole % 60)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
