//! Display formatting for listing cells.

use chrono::{DateTime, Local};

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable byte size: largest unit among Bytes/KB/MB/GB with a
/// scaled value >= 1, two decimals with trailing zeros trimmed. Values
/// past the table clamp to GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let mut scaled = format!("{value:.2}");
    if scaled.contains('.') {
        scaled.truncate(scaled.trim_end_matches('0').trim_end_matches('.').len());
    }
    format!("{} {}", scaled, UNITS[unit])
}

/// Render an optional ISO-8601 timestamp in local time. Absent or empty
/// input reads "Unknown"; anything unparsable reads "Invalid date".
pub fn format_timestamp(uploaded_at: Option<&str>) -> String {
    let raw = match uploaded_at {
        None => return "Unknown".to_string(),
        Some(s) if s.is_empty() => return "Unknown".to_string(),
        Some(s) => s,
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => "Invalid date".to_string(),
    }
}
