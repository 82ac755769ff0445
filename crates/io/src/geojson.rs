//! Watershed boundary GeoJSON files.
//!
//! Hydrologic-unit layers arrive as GeoJSON feature collections where every
//! feature is a `Polygon` or `MultiPolygon` carrying its unit code in the
//! properties map. Positions may carry an altitude; only the first two
//! coordinates are kept.

use std::fs;
use std::path::Path;

use fos_basins::{Watershed, WatershedLayer};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::IoError;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: serde_json::Map<String, Value>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
}

impl Geometry {
    fn to_multi_polygon(&self, path: &Path) -> Result<MultiPolygon<f64>, IoError> {
        match self {
            Geometry::Polygon { coordinates } => {
                Ok(MultiPolygon::new(vec![rings_to_polygon(coordinates, path)?]))
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .map(|rings| rings_to_polygon(rings, path))
                .collect::<Result<Vec<_>, _>>()
                .map(MultiPolygon::new),
        }
    }
}

fn rings_to_polygon(rings: &[Vec<Vec<f64>>], path: &Path) -> Result<Polygon<f64>, IoError> {
    let Some((exterior, holes)) = rings.split_first() else {
        return Err(IoError::Json {
            path: path.to_path_buf(),
            reason: "polygon with no rings".to_string(),
        });
    };
    let exterior = ring_to_line(exterior, path)?;
    let holes = holes
        .iter()
        .map(|ring| ring_to_line(ring, path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, holes))
}

fn ring_to_line(ring: &[Vec<f64>], path: &Path) -> Result<LineString<f64>, IoError> {
    let mut coords = Vec::with_capacity(ring.len());
    for position in ring {
        if position.len() < 2 {
            return Err(IoError::Json {
                path: path.to_path_buf(),
                reason: "position with fewer than two coordinates".to_string(),
            });
        }
        coords.push(Coord {
            x: position[0],
            y: position[1],
        });
    }
    Ok(LineString::from(coords))
}

fn property_string(properties: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_layer(
    text: &str,
    label: &str,
    id_property: &str,
    path: &Path,
) -> Result<WatershedLayer, IoError> {
    let collection: FeatureCollection = serde_json::from_str(text).map_err(|e| IoError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut watersheds = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        let id = property_string(&feature.properties, id_property).ok_or_else(|| {
            IoError::Json {
                path: path.to_path_buf(),
                reason: format!("feature missing '{id_property}' property"),
            }
        })?;
        let name = property_string(&feature.properties, "name").unwrap_or_else(|| id.clone());
        let boundary = feature.geometry.to_multi_polygon(path)?;
        watersheds.push(Watershed::new(id, name, boundary));
    }
    Ok(WatershedLayer::new(label, watersheds)?)
}

/// Reads a watershed boundary layer from a GeoJSON feature collection.
///
/// Every feature must carry its hydrologic-unit code under `id_property`
/// (for the standard layers that key matches the label, `huc6` or `huc8`).
/// A `name` property supplies the display name when present; the code
/// stands in otherwise.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::Json`] for parse problems or unsupported geometry, and
/// [`IoError::Basin`] if the layer is empty or repeats a unit code.
pub fn read_watershed_layer(
    path: &Path,
    label: &str,
    id_property: &str,
) -> Result<WatershedLayer, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| IoError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let layer = parse_layer(&text, label, id_property, path)?;
    info!(label, n_watersheds = layer.len(), "read watershed layer");
    Ok(layer)
}
