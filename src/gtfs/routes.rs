//! Simplified route paths: one representative trip per (route, direction).

use std::path::Path;

use anyhow::Result;
use hashbrown::{HashMap, HashSet};
use tracing::{debug, info};

use super::{read_table, Row};
use crate::models::{HeadwayFlags, RoutePathPoint};

struct StopRecord {
    lat: f64,
    lon: f64,
    name: String,
    headway: HeadwayFlags,
}

#[derive(Default)]
struct RouteMeta {
    short_name: String,
    long_name: String,
    route_type: String,
    color: String,
    text_color: String,
}

/// Derive simplified route paths for one agency's GTFS directory.
///
/// Each (route_id, direction_id) pair is represented by its first trip in
/// trips.txt order; that trip's stops, ordered by stop_sequence, become the
/// path. Paths with fewer than two resolvable stops are dropped. Returns an
/// empty list when any required table (stops, stop_times, trips) is absent.
pub fn build_route_paths(agency: &str, agency_dir: &Path) -> Result<Vec<RoutePathPoint>> {
    let stops = read_table(&agency_dir.join("stops.txt"))?;
    let stop_times = read_table(&agency_dir.join("stop_times.txt"))?;
    let trips = read_table(&agency_dir.join("trips.txt"))?;
    let routes = read_table(&agency_dir.join("routes.txt"))?;
    let headways = read_table(&agency_dir.join("stop_headway_summary.csv"))?;

    let (Some(stops), Some(stop_times), Some(trips)) = (stops, stop_times, trips) else {
        debug!("Agency {} is missing a required GTFS table, skipping", agency);
        return Ok(Vec::new());
    };

    let mut stop_records = index_stops(&stops);
    join_headways(&mut stop_records, headways.as_deref());
    let route_meta = index_routes(routes.as_deref());

    // One representative trip per (route, direction), in trips.txt order.
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut groups: Vec<(String, String, String)> = Vec::new();
    for trip in &trips {
        let (Some(route_id), Some(trip_id)) = (trip.get("route_id"), trip.get("trip_id")) else {
            continue;
        };
        let direction_id = trip
            .get("direction_id")
            .filter(|d| !d.is_empty())
            .cloned()
            .unwrap_or_else(|| "0".to_string());
        if seen.insert((route_id.clone(), direction_id.clone())) {
            groups.push((route_id.clone(), direction_id, trip_id.clone()));
        }
    }

    // Pre-group stop_times by trip so each representative trip is one probe.
    let mut by_trip: HashMap<&str, Vec<(u32, &str)>> = HashMap::new();
    for st in &stop_times {
        let (Some(trip_id), Some(stop_id), Some(seq)) =
            (st.get("trip_id"), st.get("stop_id"), st.get("stop_sequence"))
        else {
            continue;
        };
        let Ok(seq) = seq.parse::<u32>() else { continue };
        if stop_records.contains_key(stop_id.as_str()) {
            by_trip
                .entry(trip_id.as_str())
                .or_default()
                .push((seq, stop_id.as_str()));
        }
    }

    let default_meta = RouteMeta::default();
    let mut paths = Vec::new();

    for (route_id, direction_id, sample_trip) in groups {
        let Some(trip_stops) = by_trip.get_mut(sample_trip.as_str()) else {
            continue;
        };
        trip_stops.sort();
        if trip_stops.len() < 2 {
            continue;
        }

        let meta = route_meta.get(route_id.as_str()).unwrap_or(&default_meta);
        for (i, (_, stop_id)) in trip_stops.iter().enumerate() {
            let stop = &stop_records[*stop_id];
            paths.push(RoutePathPoint {
                route_id: route_id.clone(),
                direction_id: direction_id.clone(),
                route_path_id: format!("{}_{}", route_id, direction_id),
                path_sequence: (i + 1) as u32,
                stop_lat: stop.lat,
                stop_lon: stop.lon,
                stop_id: (*stop_id).to_string(),
                stop_name: stop.name.clone(),
                agency: agency.to_string(),
                route_short_name: meta.short_name.clone(),
                route_long_name: meta.long_name.clone(),
                route_type: meta.route_type.clone(),
                route_color: meta.color.clone(),
                route_text_color: meta.text_color.clone(),
                peak_15min_weekday: stop.headway.peak_15min_weekday.clone(),
                day_15min_weekday: stop.headway.day_15min_weekday.clone(),
                night_60min_weekday: stop.headway.night_60min_weekday.clone(),
                allday_60min_weekend: stop.headway.allday_60min_weekend.clone(),
            });
        }
    }

    info!("Agency {}: {} route path points", agency, paths.len());
    Ok(paths)
}

/// Stops with parsable coordinates, keyed by stop_id.
fn index_stops(stops: &[Row]) -> HashMap<&str, StopRecord> {
    let mut records = HashMap::new();
    for stop in stops {
        let Some(stop_id) = stop.get("stop_id") else { continue };
        let (Some(Ok(lat)), Some(Ok(lon))) = (
            stop.get("stop_lat").map(|v| v.parse::<f64>()),
            stop.get("stop_lon").map(|v| v.parse::<f64>()),
        ) else {
            continue;
        };
        records.insert(
            stop_id.as_str(),
            StopRecord {
                lat,
                lon,
                name: stop.get("stop_name").cloned().unwrap_or_default(),
                headway: HeadwayFlags::default(),
            },
        );
    }
    records
}

fn join_headways(records: &mut HashMap<&str, StopRecord>, headways: Option<&[Row]>) {
    let Some(headways) = headways else { return };
    for row in headways {
        let Some(stop_id) = row.get("stop_id") else { continue };
        let Some(record) = records.get_mut(stop_id.as_str()) else {
            continue;
        };
        let flag = |key: &str| row.get(key).cloned().unwrap_or_else(|| "NO".to_string());
        record.headway = HeadwayFlags {
            peak_15min_weekday: flag("peak_15min_weekday"),
            day_15min_weekday: flag("day_15min_weekday"),
            night_60min_weekday: flag("night_60min_weekday"),
            allday_60min_weekend: flag("allday_60min_weekend"),
        };
    }
}

fn index_routes(routes: Option<&[Row]>) -> HashMap<&str, RouteMeta> {
    let mut meta = HashMap::new();
    let Some(routes) = routes else { return meta };
    for route in routes {
        let Some(route_id) = route.get("route_id") else { continue };
        let field = |key: &str| route.get(key).cloned().unwrap_or_default();
        meta.insert(
            route_id.as_str(),
            RouteMeta {
                short_name: field("route_short_name"),
                long_name: field("route_long_name"),
                route_type: field("route_type"),
                color: field("route_color"),
                text_color: field("route_text_color"),
            },
        );
    }
    meta
}
