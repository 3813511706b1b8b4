//! Ray-casting containment tests for polygon rings.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A polygon ring as an ordered sequence of [lon, lat] vertices.
///
/// The ring is treated as implicitly closed: the last vertex connects back
/// to the first whether or not it is repeated.
pub type Ring = Vec<[f64; 2]>;

/// Axis-aligned bounding box around a ring.
///
/// Used strictly as a cheap rejection filter before the full ring test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Compute the bounding box of a ring. Returns `None` for an empty ring.
    pub fn of_ring(ring: &[[f64; 2]]) -> Option<Self> {
        let first = ring.first()?;
        let mut bbox = BoundingBox {
            min_lon: first[0],
            max_lon: first[0],
            min_lat: first[1],
            max_lat: first[1],
        };
        for &[lon, lat] in &ring[1..] {
            bbox.min_lon = bbox.min_lon.min(lon);
            bbox.max_lon = bbox.max_lon.max(lon);
            bbox.min_lat = bbox.min_lat.min(lat);
            bbox.max_lat = bbox.max_lat.max(lat);
        }
        Some(bbox)
    }

    /// Inclusive range check on both axes.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.min_lon <= point.lon
            && point.lon <= self.max_lon
            && self.min_lat <= point.lat
            && point.lat <= self.max_lat
    }
}

/// Even-odd ray-casting test: is `point` inside the closed ring?
///
/// Casts a horizontal ray from the point toward +longitude and toggles on
/// each edge crossing. Winding order is irrelevant. Points exactly on an
/// edge or vertex may resolve either way; the result is deterministic for
/// a given input but carries no boundary guarantee.
pub fn point_in_ring(point: GeoPoint, ring: &[[f64; 2]]) -> bool {
    // Fewer than 3 vertices is zero-area and can never contain anything.
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let (x, y) = (point.lon, point.lat);
    let mut inside = false;

    let [mut p1x, mut p1y] = ring[0];
    for i in 1..=n {
        let [p2x, p2y] = ring[i % n];
        if y > p1y.min(p2y) && y <= p1y.max(p2y) && x <= p1x.max(p2x) {
            // The latitude straddle above rules out horizontal edges, so the
            // interpolation divisor is never zero.
            let x_intersect = (y - p1y) * (p2x - p1x) / (p2y - p1y) + p1x;
            if p1x == p2x || x <= x_intersect {
                inside = !inside;
            }
        }
        p1x = p2x;
        p1y = p2y;
    }

    inside
}
