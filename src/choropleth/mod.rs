mod metric;
mod scale;
mod style;

pub use metric::Indicator;
pub use scale::{ColorScale, LegendEntry};
pub use style::{Choropleth, FeatureStyle, MISSING_FILL};
