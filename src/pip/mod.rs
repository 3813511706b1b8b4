//! Point-in-Polygon (PIP) census tract lookup.
//!
//! Loads tract polygons from GeoJSON and answers point-containment queries
//! using even-odd ray casting behind a bounding-box pre-filter, with a
//! per-run cache over quantized coordinates.

mod cache;
mod geometry;
mod index;
mod region;
mod service;

pub use cache::QueryCache;
pub use geometry::{point_in_ring, BoundingBox, GeoPoint, Ring};
pub use index::{LookupStats, RegionIndex};
pub use region::{Feature, Geometry, Region};
pub use service::TractLocator;
