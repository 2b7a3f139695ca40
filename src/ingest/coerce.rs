//! Conversions from loosely-typed cell text to typed values.
//!
//! None of these fail: text that does not fit the target type becomes `None`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Days from the spreadsheet epoch (1899-12-30) to 1970-01-01.
///
/// Serial 0 is 1899-12-30 rather than 1899-12-31 so that serials after
/// February 1900 line up with the phantom 1900-02-29 the format counts.
pub const EPOCH_OFFSET_DAYS: i64 = 25_569;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;
const MICROS_PER_SECOND: i64 = 1_000_000;

/// Text that means "no subcategory".
const SUBCATEGORY_PLACEHOLDERS: [&str; 3] = ["n/a", "na", "none"];

const TRUE_WORDS: [&str; 3] = ["1", "true", "yes"];
const FALSE_WORDS: [&str; 3] = ["0", "false", "no"];

/// Round a day count to whole microseconds.
fn days_to_micros(days: f64) -> Option<i64> {
    if !days.is_finite() {
        return None;
    }
    let micros = (days * MICROS_PER_DAY).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(micros as i64)
}

/// Resolve a serial (plus optional time fraction) to a timestamp truncated to
/// whole seconds. Years outside 1..=9999 count as overflow.
fn serial_to_datetime(serial: f64, fraction: f64) -> Option<NaiveDateTime> {
    let since_epoch = days_to_micros(serial)?.checked_add(days_to_micros(fraction)?)?;
    let unix_micros =
        since_epoch.checked_sub(EPOCH_OFFSET_DAYS.checked_mul(86_400 * MICROS_PER_SECOND)?)?;
    let seconds = unix_micros.div_euclid(MICROS_PER_SECOND);

    let datetime = DateTime::from_timestamp(seconds, 0)?.naive_utc();
    if (1..=9999).contains(&datetime.year()) {
        Some(datetime)
    } else {
        None
    }
}

/// Convert a date serial to a calendar date.
///
/// `None`, NaN, infinite or out-of-range serials yield `None`.
pub fn serial_to_date(serial: Option<f64>) -> Option<NaiveDate> {
    serial_to_datetime(serial?, 0.0).map(|dt| dt.date())
}

/// Convert a date serial and time-of-day fraction to a timestamp.
///
/// A missing fraction counts as midnight. The result is truncated to whole
/// seconds.
pub fn serial_to_timestamp(serial: Option<f64>, fraction: Option<f64>) -> Option<NaiveDateTime> {
    serial_to_datetime(serial?, fraction.unwrap_or(0.0))
}

/// Parse a loose boolean: `1/true/yes` and `0/false/no`, case-insensitive.
pub fn parse_bool(value: &str) -> Option<bool> {
    let normalized = value.trim().to_lowercase();
    if TRUE_WORDS.contains(&normalized.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&normalized.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Parse a decimal number. Empty, non-numeric and non-finite text yield `None`.
///
/// Single underscores between digits group them (`"1_000"` is 1000).
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let number = if trimmed.contains('_') {
        strip_digit_separators(trimmed)?
    } else {
        trimmed.to_string()
    };
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Drop `_` separators. Each one must sit between two ASCII digits.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch != '_' {
            out.push(ch);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}

/// Parse an integer, accepting decimal forms such as `"3.0"`.
///
/// The value is truncated toward zero.
pub fn parse_int(value: &str) -> Option<i64> {
    let number = parse_float(value)?.trunc();
    if number.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(number as i64)
}

/// Collapse empty text to `None`.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Derive a subcategory from the "other" label.
///
/// Blank text and the placeholders `n/a`, `na` and `none` (any case) yield
/// `None`; anything else passes through trimmed.
pub fn normalize_subcategory(other_label: &str) -> Option<String> {
    let trimmed = other_label.trim();
    if trimmed.is_empty() || SUBCATEGORY_PLACEHOLDERS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}
