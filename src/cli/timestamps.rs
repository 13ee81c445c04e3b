use chrono::{DateTime, Datelike, Utc};

/// Format when a scan was made, relative to `now`:
/// - "today 14:05" / "yesterday 09:12" for the last two calendar days
/// - "Mar 3" within the current year
/// - "Dec 3, 2024" otherwise
pub fn format_scan_time(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let days = now.date_naive().signed_duration_since(timestamp.date_naive()).num_days();

    match days {
        0 => timestamp.format("today %H:%M").to_string(),
        1 => timestamp.format("yesterday %H:%M").to_string(),
        _ if timestamp.year() == now.year() => timestamp.format("%b %-d").to_string(),
        _ => timestamp.format("%b %-d, %Y").to_string(),
    }
}
