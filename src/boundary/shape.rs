use std::path::Path;

use anyhow::{Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{dbase::FieldValue, Reader, Shape};

/// Read named features from a `.shp` + `.dbf` pair, taking names from the
/// `name_field` attribute. Non-polygon shapes and unnamed records are
/// skipped rather than failing the layer.
pub(crate) fn read_features(
    path: &Path,
    name_field: &str,
) -> Result<Vec<(String, MultiPolygon<f64>)>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut out = Vec::new();
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("Error reading shape+record")?;
        let Some(FieldValue::Character(Some(name))) = record.get(name_field) else {
            continue;
        };
        if let Shape::Polygon(polygon) = shape {
            out.push((name.trim().to_string(), shp_to_geo(&polygon)));
        }
    }
    Ok(out)
}

/// Convert a shapefile polygon into a geo MultiPolygon. Shapefiles store
/// rings flat, each exterior (clockwise) followed by its holes; orientation
/// decides which is which.
fn shp_to_geo(polygon: &shapefile::Polygon) -> MultiPolygon<f64> {
    fn ring_to_linestring(points: &[shapefile::Point]) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> =
            points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
        if !coords.is_empty() && coords[0] != coords[coords.len() - 1] {
            coords.push(coords[0]);
        }
        LineString(coords)
    }

    fn signed_area(ring: &LineString<f64>) -> f64 {
        let mut area = 0.0;
        for w in ring.0.windows(2) {
            area += w[0].x * w[1].y - w[1].x * w[0].y;
        }
        area / 2.0
    }

    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in polygon.rings() {
        let ls = ring_to_linestring(ring.points());
        // Shapefile exteriors wind clockwise, i.e. negative signed area.
        if signed_area(&ls) < 0.0 {
            if let Some(ext) = exterior.take() {
                polygons.push(Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(ls);
        } else {
            holes.push(ls);
        }
    }
    if let Some(ext) = exterior {
        polygons.push(Polygon::new(ext, holes));
    }

    MultiPolygon(polygons)
}
