use ahash::AHashMap;

use serde::Serialize;

use super::metric::Indicator;
use super::scale::LegendEntry;
use crate::aggregate::EntityBreakdown;
use crate::common::fold_name;
use crate::record::VoterRecord;
use crate::types::GeoLevel;

/// Neutral fill for boundary features with no matching aggregate entity,
/// so the map never has holes.
pub const MISSING_FILL: &str = "#D9D9D9";

const STROKE: &str = "#FFFFFF";
const WEIGHT: f64 = 1.0;
const FILL_OPACITY: f64 = 0.7;

/// Style handed to the boundary renderer for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStyle {
    pub fill_color: &'static str,
    pub stroke_color: &'static str,
    pub weight: f64,
    pub fill_opacity: f64,
}

/// One indicator evaluated over the visible records: a value per entity,
/// keyed by folded name so boundary features join regardless of accent or
/// case conventions.
#[derive(Debug, Clone)]
pub struct Choropleth {
    indicator: Indicator,
    values: AHashMap<String, f64>,
}

impl Choropleth {
    pub fn compute(records: &[&VoterRecord], level: GeoLevel, indicator: Indicator) -> Self {
        let values = EntityBreakdown::collect(records, level)
            .iter()
            .map(|(entity, breakdown)| (fold_name(entity), indicator.evaluate(breakdown)))
            .collect();
        Self { indicator, values }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// The indicator value joined to a boundary feature name, if any entity
    /// matches.
    pub fn value_for(&self, feature_name: &str) -> Option<f64> {
        self.values.get(&fold_name(feature_name)).copied()
    }

    /// Per-feature style function for the boundary renderer. A feature with
    /// no matching entity gets the neutral fill rather than being omitted.
    pub fn style_for(&self, feature_name: &str) -> FeatureStyle {
        let fill_color = match self.value_for(feature_name) {
            Some(value) => self.indicator.scale().color_for(value),
            None => MISSING_FILL,
        };
        FeatureStyle {
            fill_color,
            stroke_color: STROKE,
            weight: WEIGHT,
            fill_opacity: FILL_OPACITY,
        }
    }

    /// Legend rows for the indicator's scale; same table the fills use.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.indicator.scale().legend()
    }
}
