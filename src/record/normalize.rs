use std::sync::Arc;

use crate::common::canonical;

/// Sentinel category for absent or unparseable categorical fields.
pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// Parse a locale-formatted count ("1.234", "12 345", "1.234,00") into a
/// non-negative integer. Grouping runs use dots, spaces or NBSP; a comma
/// starts the decimal part, which counts never carry and is discarded.
/// Anything unparseable or negative yields 0 rather than an error.
pub(crate) fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return 0;
    }
    let integer_part = trimmed.split(',').next().unwrap_or("");

    let mut digits = String::with_capacity(integer_part.len());
    for c in integer_part.chars() {
        match c {
            '0'..='9' => digits.push(c),
            '.' | ' ' | '\u{a0}' => {}
            _ => return 0,
        }
    }
    digits.parse().unwrap_or(0)
}

/// Upper-cased, whitespace-normalized categorical label; empty input
/// degrades to the `"N/A"` sentinel.
pub(crate) fn normalize_label(raw: &str) -> Arc<str> {
    let canon = canonical(raw);
    if canon.is_empty() {
        Arc::from(NOT_AVAILABLE)
    } else {
        Arc::from(canon)
    }
}

/// Boolean inclusion flags arrive as "S"/"SIM"/"1"; everything else is false.
pub(crate) fn parse_flag(raw: &str) -> bool {
    matches!(canonical(raw).as_str(), "S" | "SIM" | "1" | "TRUE")
}
