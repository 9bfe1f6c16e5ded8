//! Définition et implémentation des commandes CLI
//!
//! - `to-utm` / `to-mgrs` : lat/lon → UTM ou MGRS
//! - `from-utm` / `from-mgrs` : UTM ou MGRS → lat/lon
//! - `batch` : conversion d'un fichier, une coordonnée par ligne

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use coordconv::config::{resolve_format, resolve_jobs, FORMAT_ENV, JOBS_ENV};
use coordconv::{run_batch, BatchConfig, OutputFormat};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert latitude/longitude to UTM
    ToUtm(PointArgs),

    /// Convert latitude/longitude to an MGRS reference
    ToMgrs(PointArgs),

    /// Convert a UTM coordinate ("31 U 452303 5411318") to latitude/longitude
    FromUtm {
        /// UTM coordinate: zone, band, easting and northing separated by single spaces
        utm: String,
    },

    /// Convert an MGRS reference ("31UDQ5230311318") to latitude/longitude
    FromMgrs {
        /// 15-character MGRS reference
        mgrs: String,
    },

    /// Convert a file of coordinates, one per line
    Batch {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Config preset (latlon-to-mgrs/latlon-to-utm/mgrs-to-latlon/utm-to-latlon) or path to a JSON config
        #[arg(long, default_value = "latlon-to-mgrs")]
        config: String,

        /// Output format (défaut : env COORDCONV_FORMAT, puis extension du fichier, puis csv)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Number of worker threads (défaut : env COORDCONV_JOBS / nombre de CPU)
        #[arg(long, alias = "threads")]
        jobs: Option<usize>,

        /// Write the conversion report as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

/// Point en degrés décimaux
#[derive(Args)]
pub struct PointArgs {
    /// Latitude in degrees [-90, 90]
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees [-180, 180)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

/// Exécute la commande to-utm
pub fn cmd_to_utm(lat: f64, lon: f64) -> Result<()> {
    let utm = utmref::lat_lon_to_utm(lat, lon)
        .context(format!("Failed to convert ({}, {}) to UTM", lat, lon))?;
    println!("{}", utm);
    Ok(())
}

/// Exécute la commande to-mgrs
pub fn cmd_to_mgrs(lat: f64, lon: f64) -> Result<()> {
    let mgrs = utmref::lat_lon_to_mgrs(lat, lon)
        .context(format!("Failed to convert ({}, {}) to MGRS", lat, lon))?;
    println!("{}", mgrs);
    Ok(())
}

/// Exécute la commande from-utm
pub fn cmd_from_utm(utm: &str) -> Result<()> {
    let (lat, lon) = utmref::utm_to_lat_lon(utm).context("Failed to convert UTM coordinate")?;
    println!("{:.7} {:.7}", lat, lon);
    Ok(())
}

/// Exécute la commande from-mgrs
pub fn cmd_from_mgrs(mgrs: &str) -> Result<()> {
    let (lat, lon) = utmref::mgrs_to_lat_lon(mgrs).context("Failed to convert MGRS reference")?;
    println!("{:.7} {:.7}", lat, lon);
    Ok(())
}

/// Exécute la commande batch
pub fn cmd_batch(
    input: &Path,
    output: &Path,
    config_name: &str,
    format: Option<OutputFormat>,
    jobs: Option<usize>,
    report_path: Option<&Path>,
) -> Result<()> {
    let config = BatchConfig::resolve(config_name)
        .context(format!("Failed to load config '{}'", config_name))?;
    let format = resolve_format(format, std::env::var(FORMAT_ENV).ok().as_deref(), output);
    let jobs = resolve_jobs(jobs, std::env::var(JOBS_ENV).ok().as_deref());

    println!("=== Batch {} → {} ===", config.input, config.output);
    println!("Input: {}", input.display());
    println!("Output: {} ({})", output.display(), format);
    println!("Config: {}", config_name);
    println!("Jobs: {}", jobs);

    let report = run_batch(input, output, &config, format, jobs)?;
    report.display();

    if let Some(path) = report_path {
        report
            .save_to_file(path)
            .context(format!("Failed to write report: {}", path.display()))?;
        info!(report = %path.display(), "Report saved");
    }

    Ok(())
}
