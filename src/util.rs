// Forgiving parsers for CSV cells and command-line values.
//
// Simulation exports are messy (thousands separators, stray whitespace,
// blank cells), so parsing is centralized here and returns `None` instead of
// failing.
use chrono::NaiveDate;

/// Parse a string-like value into `f64`.
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters other than the
///   exponent marker (`1.5e6` is a valid count).
/// - Strips thousands separators like `","` before parsing.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Accepts ISO `YYYY-MM-DD` as well as the chart's own `DD.MM.YYYY`.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d.%m.%Y"))
        .ok()
}

pub fn days_diff(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
