use serde::{Deserialize, Serialize};

/// Geographic granularity, ordered coarse to fine.
/// Selecting a value at one level resets every finer level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoLevel {
    Municipality, // Highest-level entity
    Zone,         // Electoral zone -> Municipality
    Location,     // Polling location -> Zone
    Section,      // Lowest-level entity
}

impl GeoLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            GeoLevel::Municipality => "municipality",
            GeoLevel::Zone => "zone",
            GeoLevel::Location => "location",
            GeoLevel::Section => "section",
        }
    }

    pub fn order() -> [GeoLevel; 4] {
        [
            GeoLevel::Municipality,
            GeoLevel::Zone,
            GeoLevel::Location,
            GeoLevel::Section,
        ]
    }

    /// The next finer level, or `None` at `Section`.
    pub fn finer(&self) -> Option<GeoLevel> {
        match self {
            GeoLevel::Municipality => Some(GeoLevel::Zone),
            GeoLevel::Zone => Some(GeoLevel::Location),
            GeoLevel::Location => Some(GeoLevel::Section),
            GeoLevel::Section => None,
        }
    }

    /// The next coarser level, or `None` at `Municipality`.
    pub fn coarser(&self) -> Option<GeoLevel> {
        match self {
            GeoLevel::Municipality => None,
            GeoLevel::Zone => Some(GeoLevel::Municipality),
            GeoLevel::Location => Some(GeoLevel::Zone),
            GeoLevel::Section => Some(GeoLevel::Location),
        }
    }

    /// Every level strictly coarser than this one, in cascade order.
    pub fn coarser_levels(&self) -> &'static [GeoLevel] {
        match self {
            GeoLevel::Municipality => &[],
            GeoLevel::Zone => &[GeoLevel::Municipality],
            GeoLevel::Location => &[GeoLevel::Municipality, GeoLevel::Zone],
            GeoLevel::Section => &[GeoLevel::Municipality, GeoLevel::Zone, GeoLevel::Location],
        }
    }
}
