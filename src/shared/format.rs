//! Display formatting helpers shared by every renderer.
//!
//! Numeric summary values are shown with thousands separators and exactly
//! two decimal places; counts stay plain integers; byte totals get a
//! human-readable B/KB/MB/... form.

/// Format a byte count as a human-readable string, e.g. "1.25 MB"
pub fn human_bytes(num: u64) -> String {
    const SYMBOLS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = num as f64;
    let mut i = 0;
    while value >= 1024.0 && i < SYMBOLS.len() - 1 {
        value /= 1024.0;
        i += 1;
    }
    format!("{:.2} {}", value, SYMBOLS[i])
}

/// Format a float with thousands separators and two decimal places.
/// Non-finite values pass through as-is ("NaN", "inf", "-inf").
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let negative = value < 0.0;
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let grouped = group_thousands(int_part);
    if negative {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Format an integer count with thousands separators
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
