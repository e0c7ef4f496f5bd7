//! Display formatting for counters and dates.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Placeholder for an absent or unparsable date.
pub const DATE_PLACEHOLDER: &str = "--";

/// Format a counter with `,` thousands separators (en-US grouping).
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Parse a feed date: RFC 3339, a naive date-time, or a bare `YYYY-MM-DD`.
/// Naive values are taken as UTC.
pub fn parse_feed_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Relative-or-absolute date relative to `now`, compared on UTC calendar days.
///
/// `Today`, `Yesterday`, `N days ago` for the preceding week, otherwise
/// `Jan 5` (or `Jan 5, 2023` outside the current year).
pub fn format_date(when: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(when) = when else {
        return DATE_PLACEHOLDER.to_string();
    };

    let days = (now.date_naive() - when.date_naive()).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ if when.year() != now.year() => when.format("%b %-d, %Y").to_string(),
        _ => when.format("%b %-d").to_string(),
    }
}

/// [`format_date`] over a raw, possibly absent, feed string.
pub fn format_timestamp(value: Option<&str>, now: DateTime<Utc>) -> String {
    format_date(value.and_then(parse_feed_date), now)
}
