use anyhow::{Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

/// Read named polygonal features from a GeoJSON FeatureCollection. Features
/// lacking the name property or a polygonal geometry are skipped rather than
/// failing the layer.
pub(crate) fn read_features(
    bytes: &[u8],
    name_property: &str,
) -> Result<Vec<(String, MultiPolygon<f64>)>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    let mut out = Vec::new();

    if let Some(features) = value["features"].as_array() {
        for feature in features {
            let Some(name) = feature["properties"][name_property].as_str() else {
                continue;
            };
            let geometry = &feature["geometry"];
            let geom = match geometry["type"].as_str() {
                Some("MultiPolygon") => geometry["coordinates"]
                    .as_array()
                    .map(|coords| parse_multipolygon_coords(coords))
                    .transpose()?,
                // Be lenient: accept bare Polygon features too.
                Some("Polygon") => geometry["coordinates"]
                    .as_array()
                    .map(|rings| parse_polygon_coords(rings))
                    .transpose()?
                    .map(|p| MultiPolygon(vec![p])),
                _ => None,
            };
            if let Some(geom) = geom {
                out.push((name.trim().to_string(), geom));
            }
        }
    }
    Ok(out)
}

fn parse_multipolygon_coords(coords: &[Value]) -> Result<MultiPolygon<f64>> {
    let mut polygons = Vec::new();
    for polygon_coords in coords {
        if let Some(rings) = polygon_coords.as_array() {
            polygons.push(parse_polygon_coords(rings)?);
        }
    }
    Ok(MultiPolygon(polygons))
}

/// The first ring is the exterior; any further rings are holes.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior = rings
        .first()
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid polygon: missing exterior ring"))?;
    let exterior = parse_ring_coords(exterior)?;

    let mut interiors = Vec::new();
    for ring in rings.iter().skip(1) {
        if let Some(ring) = ring.as_array() {
            interiors.push(parse_ring_coords(ring)?);
        }
    }
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from GeoJSON coordinates: `[[x, y], [x, y], ...]`.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::new();
    for coord_pair in coords {
        if let Some(coord_array) = coord_pair.as_array() {
            if coord_array.len() >= 2 {
                let x = coord_array[0]
                    .as_f64()
                    .ok_or_else(|| anyhow::anyhow!("Invalid coordinate: x must be a number"))?;
                let y = coord_array[1]
                    .as_f64()
                    .ok_or_else(|| anyhow::anyhow!("Invalid coordinate: y must be a number"))?;
                points.push(Coord { x, y });
            }
        }
    }

    // Ensure the ring is closed (first point == last point).
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }
    Ok(LineString(points))
}
