//! Region index: bulk load from GeoJSON, first-match point queries.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::geometry::{point_in_ring, GeoPoint};
use super::region::{Feature, Region};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

/// Counters for one or more lookups, used to verify that the bounding-box
/// pre-filter actually short-circuits the ring test.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupStats {
    pub bbox_tests: u64,
    pub ring_tests: u64,
}

/// An ordered collection of regions, queried by linear scan with a
/// bounding-box pre-filter per part.
///
/// Regions are held in load order and never mutated; with thousands of
/// regions the bbox filter prunes nearly every candidate, so the scan
/// stays cheap without a spatial tree.
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    /// Build an index from already-parsed features, preserving order.
    pub fn build(features: Vec<Feature>) -> Self {
        let regions: Vec<Region> = features.into_iter().map(Region::from_feature).collect();
        let unmatchable = regions.iter().filter(|r| !r.has_parts()).count();
        info!(
            "Region index built: {} regions ({} without matchable geometry)",
            regions.len(),
            unmatchable
        );
        Self { regions }
    }

    /// Load a GeoJSON FeatureCollection from disk.
    ///
    /// A structurally invalid source (missing `features`, a feature without
    /// `geometry`) is fatal here; unrecognized geometry types are not.
    pub fn load_geojson<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read region source {}", path.display()))?;
        Self::from_geojson_str(&content)
            .with_context(|| format!("Failed to parse region source {}", path.display()))
    }

    /// Parse a GeoJSON FeatureCollection string into an index.
    pub fn from_geojson_str(content: &str) -> Result<Self> {
        let collection: FeatureCollection =
            serde_json::from_str(content).context("Invalid FeatureCollection")?;
        Ok(Self::build(collection.features))
    }

    /// Find the region containing `point`.
    ///
    /// Regions are scanned in load order and the first match wins, so the
    /// result is deterministic even where source polygons overlap.
    pub fn find_region(&self, point: GeoPoint) -> Option<&Region> {
        self.find_region_traced(point, &mut LookupStats::default())
    }

    /// `find_region` with per-call test counters, for instrumentation.
    pub fn find_region_traced(
        &self,
        point: GeoPoint,
        stats: &mut LookupStats,
    ) -> Option<&Region> {
        self.find_region_pos(point, stats).map(|i| &self.regions[i])
    }

    /// Load-order position of the first matching region.
    pub fn find_region_pos(&self, point: GeoPoint, stats: &mut LookupStats) -> Option<usize> {
        for (pos, region) in self.regions.iter().enumerate() {
            for (ring, bbox) in region.parts() {
                stats.bbox_tests += 1;
                if !bbox.contains(point) {
                    continue;
                }
                stats.ring_tests += 1;
                if point_in_ring(point, ring) {
                    return Some(pos);
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in load order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_feature(geoid: &str, min: f64, max: f64) -> String {
        format!(
            r#"{{
                "geometry": {{
                    "type": "Polygon",
                    "coordinates": [[[{min}, {min}], [{max}, {min}], [{max}, {max}], [{min}, {max}]]]
                }},
                "properties": {{"GEOID": "{geoid}"}}
            }}"#
        )
    }

    fn index_of(features: &[String]) -> RegionIndex {
        let json = format!(r#"{{"features": [{}]}}"#, features.join(","));
        RegionIndex::from_geojson_str(&json).unwrap()
    }

    #[test]
    fn test_find_region_hit_and_miss() {
        let index = index_of(&[square_feature("a", 0.0, 1.0)]);
        let hit = index.find_region(GeoPoint::new(0.5, 0.5)).unwrap();
        assert_eq!(hit.label.geoid, "a");
        assert!(index.find_region(GeoPoint::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_bbox_miss_skips_ring_test() {
        let index = index_of(&[square_feature("a", 0.0, 1.0), square_feature("b", 2.0, 3.0)]);
        let mut stats = LookupStats::default();
        // Far outside every bounding box: the ring test must never run.
        assert!(index
            .find_region_traced(GeoPoint::new(50.0, 50.0), &mut stats)
            .is_none());
        assert_eq!(stats.bbox_tests, 2);
        assert_eq!(stats.ring_tests, 0);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        // Identical squares: load order decides.
        let index = index_of(&[square_feature("first", 0.0, 2.0), square_feature("second", 0.0, 2.0)]);
        for _ in 0..5 {
            let hit = index.find_region(GeoPoint::new(1.0, 1.0)).unwrap();
            assert_eq!(hit.label.geoid, "first");
        }
    }

    #[test]
    fn test_multipart_region_matches_either_part() {
        let json = r#"{
            "features": [{
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
                        [[[10.0, 10.0], [11.0, 10.0], [11.0, 11.0], [10.0, 11.0]]]
                    ]
                },
                "properties": {"GEOID": "island"}
            }]
        }"#;
        let index = RegionIndex::from_geojson_str(json).unwrap();
        assert!(index.find_region(GeoPoint::new(0.5, 0.5)).is_some());
        assert!(index.find_region(GeoPoint::new(10.5, 10.5)).is_some());
        // The gap between the parts is outside.
        assert!(index.find_region(GeoPoint::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_unsupported_geometry_never_matches_but_is_retained() {
        let json = r#"{
            "features": [{
                "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
                "properties": {"GEOID": "line"}
            }]
        }"#;
        let index = RegionIndex::from_geojson_str(json).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.regions()[0].label.geoid, "line");
        assert!(index.find_region(GeoPoint::new(0.5, 0.5)).is_none());
    }

    #[test]
    fn test_structurally_invalid_source_fails_load() {
        assert!(RegionIndex::from_geojson_str(r#"{"nope": []}"#).is_err());
        assert!(
            RegionIndex::from_geojson_str(r#"{"features": [{"properties": {}}]}"#).is_err()
        );
    }

    #[test]
    fn test_out_of_range_point_is_just_a_miss() {
        let index = index_of(&[square_feature("a", 0.0, 1.0)]);
        assert!(index.find_region(GeoPoint::new(400.0, -400.0)).is_none());
    }
}
