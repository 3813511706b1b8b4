//! Simplified route-path builder.
//!
//! Walks a directory of per-agency GTFS feeds and writes one flat CSV of
//! route paths, one row per stop along each (route, direction) pair.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

use madrona::gtfs::build_route_paths;
use madrona::models::RoutePathPoint;

#[derive(Parser, Debug)]
#[command(name = "routes")]
#[command(about = "Build simplified route paths from GTFS feeds")]
struct Args {
    /// Directory containing one GTFS directory per agency
    #[arg(short, long)]
    gtfs_dir: PathBuf,

    /// Output CSV path
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Agency directories, processed in name order for stable output.
    let mut agencies: Vec<(String, PathBuf)> = WalkDir::new(&args.gtfs_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| (name.to_string(), entry.path().to_path_buf()))
        })
        .collect();
    agencies.sort();

    if agencies.is_empty() {
        anyhow::bail!("No agency directories under {}", args.gtfs_dir.display());
    }
    info!("Found {} agency directories", agencies.len());

    let mut all_paths: Vec<RoutePathPoint> = Vec::new();
    let mut successful = 0usize;

    for (agency, dir) in &agencies {
        match build_route_paths(agency, dir) {
            Ok(paths) if !paths.is_empty() => {
                all_paths.extend(paths);
                successful += 1;
            }
            Ok(_) => {}
            Err(err) => warn!("Skipping agency {}: {:#}", agency, err),
        }
    }

    all_paths.sort_by(|a, b| {
        (&a.agency, &a.route_id, &a.direction_id, a.path_sequence).cmp(&(
            &b.agency,
            &b.route_id,
            &b.direction_id,
            b.path_sequence,
        ))
    });

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for point in &all_paths {
        writer.serialize(point)?;
    }
    writer.flush()?;

    let unique_paths: BTreeSet<&str> = all_paths.iter().map(|p| p.route_path_id.as_str()).collect();
    let unique_routes: BTreeSet<&str> = all_paths.iter().map(|p| p.route_id.as_str()).collect();

    info!(
        "Wrote {} rows ({} paths, {} routes, {} of {} agencies) -> {}",
        all_paths.len(),
        unique_paths.len(),
        unique_routes.len(),
        successful,
        agencies.len(),
        args.output.display()
    );

    Ok(())
}
