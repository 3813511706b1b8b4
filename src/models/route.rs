//! Row types for the simplified route-path output.

use serde::{Deserialize, Serialize};

/// One stop along a simplified route path, flattened for Tableau-style
/// consumption. Field order matches the output CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePathPoint {
    pub route_id: String,
    pub direction_id: String,
    /// `"{route_id}_{direction_id}"`, unique per directed path
    pub route_path_id: String,
    /// 1-based position of the stop along the path
    pub path_sequence: u32,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub stop_id: String,
    pub stop_name: String,
    pub agency: String,
    pub route_short_name: String,
    pub route_long_name: String,
    pub route_type: String,
    pub route_color: String,
    pub route_text_color: String,
    pub peak_15min_weekday: String,
    pub day_15min_weekday: String,
    pub night_60min_weekday: String,
    pub allday_60min_weekend: String,
}

/// Service-frequency flags joined in from the headway summary, defaulting
/// to "NO" when a stop has no summary row.
#[derive(Debug, Clone)]
pub struct HeadwayFlags {
    pub peak_15min_weekday: String,
    pub day_15min_weekday: String,
    pub night_60min_weekday: String,
    pub allday_60min_weekend: String,
}

impl Default for HeadwayFlags {
    fn default() -> Self {
        Self {
            peak_15min_weekday: "NO".to_string(),
            day_15min_weekday: "NO".to_string(),
            night_60min_weekday: "NO".to_string(),
            allday_60min_weekend: "NO".to_string(),
        }
    }
}
