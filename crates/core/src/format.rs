use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Placeholder for a missing date field
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Placeholder for a date field that could not be parsed
pub const INVALID_DATE: &str = "Invalid date";

/// Placeholder for a missing or non-numeric domain age
pub const UNKNOWN_AGE: &str = "Unknown age";

/// Age phrase used when neither a whole year nor a whole month has elapsed
pub const LESS_THAN_A_MONTH: &str = "< 1 month";

/// Maximum displayed length of a single nameserver hostname
pub const HOSTNAME_MAX_LEN: usize = 25;

const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_MONTH: f64 = 30.0;

/// Format a provider date as zero-padded `MM/DD/YYYY`
///
/// Blank or absent input yields [`UNKNOWN_DATE`], unparseable input yields
/// [`INVALID_DATE`]. Dates carrying an offset are normalized to UTC first.
pub fn format_date(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return UNKNOWN_DATE.to_string(),
    };

    match parse_calendar_date(raw) {
        Some(date) => date.format("%m/%d/%Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Parse the date formats the WHOIS provider is known to emit
///
/// Accepts RFC 3339, `2020-01-15T10:00:00+0000`, `2020-01-15 10:00:00 UTC`,
/// naive date-times and plain `2020-01-15`.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S UTC",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Describe a domain age given in days as years and months
///
/// Uses 365-day years and 30-day months with no calendar correction.
/// Absent, negative or non-finite input yields [`UNKNOWN_AGE`].
pub fn format_age(days: Option<f64>) -> String {
    let days = match days {
        Some(days) if days.is_finite() && days >= 0.0 => days,
        _ => return UNKNOWN_AGE.to_string(),
    };

    let years = (days / DAYS_PER_YEAR).floor() as u64;
    let months = ((days % DAYS_PER_YEAR) / DAYS_PER_MONTH).floor() as u64;

    let parts: Vec<String> = [(years, "year"), (months, "month")]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| pluralize(count, unit))
        .collect();

    if parts.is_empty() {
        LESS_THAN_A_MONTH.to_string()
    } else {
        parts.join(" and ")
    }
}

fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Cut `value` to `max_len` characters, appending `...` when shortened
pub fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() > max_len {
        let head: String = value.chars().take(max_len).collect();
        format!("{head}...")
    } else {
        value.to_string()
    }
}
