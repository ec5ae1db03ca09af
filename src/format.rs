// Display formatting for counts, deltas, shares and chart dates.
//
// Every function here is total. NaN inputs (a value the simulation has not
// produced yet) render as an empty string.
use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, Offset, TimeZone};
use num_format::{Locale, ToFormattedString};

/// Month labels indexed by calendar month number; index 0 is unused.
const MONTHS: [&str; 13] = [
    "zero", "Jan", "Feb", "March", "April", "May", "June", "July", "Aug", "Sep", "Oct", "Nov",
    "Dec",
];

/// Insert a comma every three digits (`1234567` -> `1,234,567`). The sign is
/// not part of the grouping, so `-123456` becomes `-123,456`.
pub fn format_integer<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

fn infinity_text(v: f64) -> &'static str {
    if v.is_sign_negative() {
        "-Infinity"
    } else {
        "Infinity"
    }
}

/// Round half up (toward positive infinity): `2.5 -> 3`, `-2.5 -> -2`.
fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Group the digits of an unsigned decimal string.
fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// 2^53: from here on every f64 is already a whole number.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Round a population count to a whole number and group its digits.
pub fn format_count(count: f64) -> String {
    if count.is_nan() {
        return String::new();
    }
    if count.is_infinite() {
        return infinity_text(count).to_string();
    }
    if count.abs() < EXACT_INT_LIMIT {
        return format_integer(round_half_up(count) as i64);
    }
    let digits = format!("{:.0}", count.abs());
    let sign = if count < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(&digits))
}

/// Like `format_count` but with an explicit `+` for zero and growth.
pub fn format_delta(delta: f64) -> String {
    if delta.is_nan() {
        return String::new();
    }
    let sign = if delta >= 0.0 { "+" } else { "" };
    format!("{}{}", sign, format_count(delta))
}

/// Render a proportion as a parenthesised percentage with two decimals,
/// e.g. `0.05` -> `(5.00%)`. Exact midpoints round away from zero, so
/// `0.00125` -> `(0.13%)`.
pub fn format_percent(proportion: f64) -> String {
    if proportion.is_nan() {
        return String::new();
    }
    // `+ 0.0` folds negative zero so it prints as `0.00`.
    let pct = 100.0 * proportion + 0.0;
    if pct.is_infinite() {
        return format!("({}%)", infinity_text(pct));
    }
    // A value sits exactly halfway between two hundredths only when it is an
    // odd multiple of 1/8; scaling by 8 is exact.
    let eighths = pct * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let away = (pct.abs() * 100.0).ceil() / 100.0;
        return format!("({:.2}%)", away.copysign(pct));
    }
    format!("({:.2}%)", pct)
}

/// Shift a date by whole calendar days. Saturates at the representable
/// range instead of panicking.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Shift a zoned timestamp by calendar days, keeping the local wall-clock
/// time. A wall time skipped by a DST jump moves forward by the size of the
/// gap; an ambiguous one resolves to the earlier instant. Returns `None` only
/// outside the representable range.
pub fn add_days_zoned<Tz: TimeZone>(dt: &DateTime<Tz>, days: i64) -> Option<DateTime<Tz>> {
    let local = dt.naive_local();
    let shifted = if days >= 0 {
        local.checked_add_days(Days::new(days.unsigned_abs()))?
    } else {
        local.checked_sub_days(Days::new(days.unsigned_abs()))?
    };
    let tz = dt.timezone();
    match tz.from_local_datetime(&shifted) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            // Read the skipped time with the offset in force a day earlier.
            let before = tz
                .from_local_datetime(&shifted.checked_sub_days(Days::new(1))?)
                .earliest()?;
            let offset = Duration::seconds(i64::from(before.offset().fix().local_minus_utc()));
            let utc = shifted.checked_sub_signed(offset)?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

/// `DD.MM.YYYY`, read straight from the calendar fields so the output does
/// not depend on the host locale.
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{:02}.{:02}.{:04}", date.day(), date.month(), date.year())
}

pub fn month_abbreviation<D: Datelike>(date: &D) -> &'static str {
    MONTHS[date.month() as usize]
}

/// Label for the bar `days` after the first bar of a chart.
pub fn date_label(first_bar_date: NaiveDate, days: i64) -> String {
    format_date(&add_days(first_bar_date, days))
}
