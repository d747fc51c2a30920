pub mod report;
pub mod summary;

use anyhow::{bail, Result};
use eleitorado::GeoLevel;

/// Parse a granularity argument.
pub fn parse_granularity(raw: &str) -> Result<GeoLevel> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "municipality" => Ok(GeoLevel::Municipality),
        "zone" => Ok(GeoLevel::Zone),
        "location" => Ok(GeoLevel::Location),
        "section" => Ok(GeoLevel::Section),
        other => bail!("Unknown granularity: {other} (expected municipality, zone, location or section)"),
    }
}

/// Split a comma-separated sheet list.
pub fn split_sheets(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}
