//! Labeled polygonal regions built from GeoJSON features.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::geometry::{BoundingBox, Ring};
use crate::models::TractLabel;

/// One GeoJSON feature from the region source.
///
/// A missing `geometry` key fails deserialization, which is fatal to the
/// load step; an unrecognized geometry *type* is not.
#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Recognized geometry shapes. Anything else deserializes to `Unsupported`
/// and yields a region with zero matchable parts.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

/// An immutable labeled region: one or more exterior rings, each pre-paired
/// with its bounding box. Multi-part regions (islands, enclaves) match when
/// any part matches.
#[derive(Debug, Clone)]
pub struct Region {
    pub label: TractLabel,
    parts: Vec<(Ring, BoundingBox)>,
}

impl Region {
    /// Build a region from a parsed feature.
    ///
    /// Only exterior rings are kept; interior rings (holes) are not
    /// supported by the containment engine. Empty rings are dropped since
    /// they have no bounding box.
    pub fn from_feature(feature: Feature) -> Self {
        let label = TractLabel::from_properties(&feature.properties);

        let rings: Vec<Ring> = match feature.geometry {
            Geometry::Polygon { mut coordinates } => {
                if coordinates.is_empty() {
                    Vec::new()
                } else {
                    vec![coordinates.swap_remove(0)]
                }
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .into_iter()
                .filter_map(|mut polygon| {
                    if polygon.is_empty() {
                        None
                    } else {
                        Some(polygon.swap_remove(0))
                    }
                })
                .collect(),
            Geometry::Unsupported => {
                debug!(geoid = %label.geoid, "unsupported geometry type, region retained with no parts");
                Vec::new()
            }
        };

        let parts = rings
            .into_iter()
            .filter_map(|ring| BoundingBox::of_ring(&ring).map(|bbox| (ring, bbox)))
            .collect();

        Self { label, parts }
    }

    /// The (ring, bbox) parts in source order.
    pub fn parts(&self) -> &[(Ring, BoundingBox)] {
        &self.parts
    }

    /// Whether this region has any matchable geometry.
    pub fn has_parts(&self) -> bool {
        !self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_polygon_exterior_ring_only() {
        let region = Region::from_feature(feature(json!({
            "geometry": {
                "type": "Polygon",
                "coordinates": [
                    [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
                    [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]]
                ]
            },
            "properties": {"GEOID": "x"}
        })));
        assert_eq!(region.parts().len(), 1);
        assert_eq!(region.parts()[0].0.len(), 4);
    }

    #[test]
    fn test_multipolygon_keeps_each_exterior() {
        let region = Region::from_feature(feature(json!({
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
                    [[[10.0, 10.0], [11.0, 10.0], [11.0, 11.0], [10.0, 11.0]]]
                ]
            },
            "properties": {}
        })));
        assert_eq!(region.parts().len(), 2);
    }

    #[test]
    fn test_unsupported_geometry_retained_without_parts() {
        let region = Region::from_feature(feature(json!({
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": {"GEOID": "53033000100"}
        })));
        assert!(!region.has_parts());
        // Label metadata still round-trips.
        assert_eq!(region.label.geoid, "53033000100");
    }

    #[test]
    fn test_missing_geometry_is_a_parse_error() {
        let result: Result<Feature, _> =
            serde_json::from_value(json!({"properties": {"GEOID": "x"}}));
        assert!(result.is_err());
    }
}
