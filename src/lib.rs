//! Madrona - census-tract enrichment for transit stop data
//!
//! This library provides shared types and modules for the annotate and routes binaries.

pub mod gtfs;
pub mod models;
pub mod pip;

pub use models::{RoutePathPoint, TractLabel};
pub use pip::{RegionIndex, TractLocator};
