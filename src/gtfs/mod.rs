//! GTFS feed loading and route-path derivation.
//!
//! A GTFS feed is a directory of delimited text tables; agencies live as
//! sibling directories under one base path. Tables are read into row maps
//! keyed by header name, mirroring how the feeds are actually joined.

mod routes;

pub use routes::build_route_paths;

use std::path::Path;

use anyhow::{Context, Result};
use hashbrown::HashMap;
use tracing::debug;

/// One CSV row as header -> value.
pub type Row = HashMap<String, String>;

/// Read a delimited table into rows keyed by header.
///
/// Returns `Ok(None)` when the file does not exist, since optional tables
/// (e.g. the headway summary) are a normal condition; unreadable or
/// malformed files are errors for the caller to decide on.
pub fn read_table(path: &Path) -> Result<Option<Vec<Row>>> {
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Bad record in {}", path.display()))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.trim().to_string()))
            .collect();
        rows.push(row);
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(Some(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let rows = read_table(&dir.path().join("stops.txt")).unwrap();
        assert!(rows.is_none());
    }

    #[test]
    fn test_read_table_rows_keyed_by_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stops.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "stop_id,stop_name,stop_lat,stop_lon").unwrap();
        writeln!(f, "s1,Main St, 47.6 ,-122.3").unwrap();
        drop(f);

        let rows = read_table(&path).unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["stop_id"], "s1");
        // Values are trimmed.
        assert_eq!(rows[0]["stop_lat"], "47.6");
    }
}
