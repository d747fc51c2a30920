use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use anyhow::Result;
use geo::{BoundingRect, Contains, MultiPolygon, Point, Rect};
use rstar::{RTree, RTreeObject, AABB};

use crate::common::fold_name;

/// One named boundary feature of the geographic layer.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    pub name: Arc<str>,
    /// Folded join key: case- and diacritic-insensitive.
    pub key: String,
    pub geom: MultiPolygon<f64>,
}

#[derive(Debug, Clone)]
struct BoundingBox {
    idx: usize, // Index of the corresponding feature
    bbox: Rect<f64>,
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// A boundary layer: named polygon features with a normalized-name index
/// for joining against aggregate entities and an R-tree over bounding boxes
/// for point lookups.
#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    features: Vec<BoundaryFeature>,
    by_key: AHashMap<String, usize>,
    rtree: RTree<BoundingBox>,
}

impl BoundaryLayer {
    pub fn new(named_geoms: Vec<(String, MultiPolygon<f64>)>) -> Self {
        let features: Vec<BoundaryFeature> = named_geoms
            .into_iter()
            .map(|(name, geom)| BoundaryFeature {
                key: fold_name(&name),
                name: Arc::from(name),
                geom,
            })
            .collect();

        let by_key = features
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.key.clone(), idx))
            .collect();

        // Features with empty geometry have no box and stay out of the tree.
        let boxes = features
            .iter()
            .enumerate()
            .filter_map(|(idx, f)| f.geom.bounding_rect().map(|bbox| BoundingBox { idx, bbox }))
            .collect();

        Self { features, by_key, rtree: RTree::bulk_load(boxes) }
    }

    /// Read a GeoJSON FeatureCollection, keyed by `name_property`.
    pub fn from_geojson_bytes(bytes: &[u8], name_property: &str) -> Result<Self> {
        Ok(Self::new(super::geojson::read_features(bytes, name_property)?))
    }

    /// Read a `.shp` + `.dbf` pair, keyed by the `name_field` attribute.
    pub fn from_shapefile(path: &Path, name_field: &str) -> Result<Self> {
        Ok(Self::new(super::shape::read_features(path, name_field)?))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    /// Feature by name, insensitive to case, accents and stray whitespace.
    pub fn get(&self, name: &str) -> Option<&BoundaryFeature> {
        self.by_key.get(&fold_name(name)).map(|&idx| &self.features[idx])
    }

    /// The feature containing `point`: R-tree candidates first, then an
    /// exact point-in-polygon test.
    pub fn locate(&self, point: Point<f64>) -> Option<&BoundaryFeature> {
        let probe = AABB::from_point([point.x(), point.y()]);
        self.rtree
            .locate_in_envelope_intersecting(&probe)
            .map(|bb| &self.features[bb.idx])
            .find(|feature| feature.geom.contains(&point))
    }
}

#[cfg(test)]
mod tests {
    use super::BoundaryLayer;
    use geo::{Coord, LineString, MultiPolygon, Point, Polygon};

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        let ring = LineString(vec![
            Coord { x: x0, y: y0 },
            Coord { x: x0 + size, y: y0 },
            Coord { x: x0 + size, y: y0 + size },
            Coord { x: x0, y: y0 + size },
            Coord { x: x0, y: y0 },
        ]);
        MultiPolygon(vec![Polygon::new(ring, vec![])])
    }

    fn layer() -> BoundaryLayer {
        BoundaryLayer::new(vec![
            ("São Miguel".to_string(), square(0.0, 0.0, 1.0)),
            ("Açu".to_string(), square(2.0, 0.0, 1.0)),
        ])
    }

    #[test]
    fn name_lookup_folds_case_and_accents() {
        let layer = layer();
        assert!(layer.get("SAO MIGUEL").is_some());
        assert!(layer.get("açu").is_some());
        assert!(layer.get("desconhecido").is_none());
    }

    #[test]
    fn locate_finds_the_containing_feature() {
        let layer = layer();
        let hit = layer.locate(Point::new(2.5, 0.5)).unwrap();
        assert_eq!(&*hit.name, "Açu");
        assert!(layer.locate(Point::new(1.5, 0.5)).is_none());
    }
}
