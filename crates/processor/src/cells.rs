//! Spreadsheet cell coercion
//!
//! Sheets ranges come back as formatted strings; these helpers turn the
//! usual dashboard noise (currency symbols, accounting negatives, percent
//! signs, "n/a" placeholders) into numbers.

/// Cell contents that mean "no value" in the source sheets
const EMPTY_SENTINELS: [&str; 6] = ["n/a", "na", "none", "null", "-", "—"];

/// Parse a currency-ish cell, stripping `$`, commas, and spaces. A blank
/// cell reads as 0.0; anything else non-numeric is `None` so callers can
/// skip the row.
pub fn to_float(cell: &str) -> Option<f64> {
    let s = cell.trim().replace([',', '$', ' '], "");
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse().ok()
}

/// Lenient integer: blanks, sentinels, and garbage fall back to `default`.
pub fn to_int_or(cell: &str, default: i64) -> i64 {
    let s = cell.trim();
    if s.is_empty() || EMPTY_SENTINELS.contains(&s.to_lowercase().as_str()) {
        return default;
    }
    s.replace(',', "").parse().unwrap_or(default)
}

/// Lenient float for dashboard cells: accounting negatives like `(500)`,
/// a trailing `%` (the number is kept as-is, not divided by 100), currency
/// symbols, and empty sentinels are all handled. Garbage falls back to
/// `default`.
pub fn to_float_or(cell: &str, default: f64) -> f64 {
    let s = cell.trim();
    if s.is_empty() || EMPTY_SENTINELS.contains(&s.to_lowercase().as_str()) {
        return default;
    }

    let (s, negative) = match s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (inner.trim(), true),
        None => (s, false),
    };

    let s = s.replace([',', '$', ' '], "");
    let s = s.strip_suffix('%').unwrap_or(&s);

    match s.parse::<f64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) => default,
    }
}
