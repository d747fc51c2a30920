mod geojson;
mod layer;
mod shape;

pub use layer::{BoundaryFeature, BoundaryLayer};
