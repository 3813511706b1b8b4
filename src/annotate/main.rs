//! Census tract annotation driver.
//!
//! Streams a route-path CSV, looks up the census tract containing each
//! stop, and writes the rows back out with tract label columns appended.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use madrona::pip::{GeoPoint, RegionIndex, TractLocator};

#[derive(Parser, Debug)]
#[command(name = "annotate")]
#[command(about = "Annotate route path stops with census tracts")]
struct Args {
    /// Route path CSV to annotate (output of the routes binary)
    #[arg(short, long)]
    routes_file: PathBuf,

    /// Census tract GeoJSON FeatureCollection
    #[arg(short, long)]
    census_file: PathBuf,

    /// Output CSV path
    #[arg(short, long)]
    output: PathBuf,
}

const TRACT_COLUMNS: [&str; 4] = [
    "census_tract_geoid",
    "census_tract_name",
    "county_fips",
    "tract_code",
];

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Loading census tracts from {}", args.census_file.display());
    let index = RegionIndex::load_geojson(&args.census_file)?;
    let mut locator = TractLocator::new(index);

    let mut reader = csv::Reader::from_path(&args.routes_file)
        .with_context(|| format!("Failed to open {}", args.routes_file.display()))?;
    let headers = reader.headers()?.clone();

    let lat_col = headers
        .iter()
        .position(|h| h == "stop_lat")
        .context("Input is missing a stop_lat column")?;
    let lon_col = headers
        .iter()
        .position(|h| h == "stop_lon")
        .context("Input is missing a stop_lon column")?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut out_headers = headers.clone();
    for col in TRACT_COLUMNS {
        out_headers.push_field(col);
    }
    writer.write_record(&out_headers)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {pos} stops annotated ({msg} matched)")?,
    );

    let mut processed: u64 = 0;
    let mut matched: u64 = 0;

    for record in reader.records() {
        let mut record = record?;
        processed += 1;

        let lat: f64 = record
            .get(lat_col)
            .unwrap_or("")
            .parse()
            .with_context(|| format!("Bad stop_lat in row {}", processed))?;
        let lon: f64 = record
            .get(lon_col)
            .unwrap_or("")
            .parse()
            .with_context(|| format!("Bad stop_lon in row {}", processed))?;

        match locator.locate(GeoPoint::new(lat, lon)) {
            Some(label) => {
                matched += 1;
                record.push_field(&label.geoid);
                record.push_field(&label.name);
                record.push_field(&label.county_fips);
                record.push_field(&label.tract_code);
            }
            None => {
                for _ in TRACT_COLUMNS {
                    record.push_field("");
                }
            }
        }

        writer.write_record(&record)?;
        pb.set_message(matched.to_string());
        pb.inc(1);
    }

    writer.flush()?;
    pb.finish_and_clear();
    locator.log_summary();

    info!(
        "Annotated {} stops ({} matched a tract) -> {}",
        processed,
        matched,
        args.output.display()
    );

    Ok(())
}
