mod geo_level;
mod dimension;

pub use geo_level::GeoLevel;
pub use dimension::{Counter, Dimension};
