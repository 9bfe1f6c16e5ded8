//! Écriture des lignes converties (CSV, JSON, GeoJSON)

pub mod csv;
pub mod geojson;
pub mod json;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::batch::ConvertedRecord;
use crate::config::BatchConfig;

/// Format du fichier de sortie
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Geojson,
}

impl OutputFormat {
    /// Format déduit de l'extension (`.csv`, `.json`, `.geojson`)
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "geojson" => Ok(Self::Geojson),
            other => anyhow::bail!("Unknown output format: {}. Use: csv, json, geojson", other),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Geojson => "geojson",
        };
        f.write_str(name)
    }
}

/// Écrit les lignes converties dans `output_path`
pub fn write_records(
    format: OutputFormat,
    records: &[ConvertedRecord],
    config: &BatchConfig,
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => csv::write_csv(&mut writer, records, config)?,
        OutputFormat::Json => json::write_json(&mut writer, records, config)?,
        OutputFormat::Geojson => geojson::write_geojson(&mut writer, records, config)?,
    }

    writer
        .flush()
        .context(format!("Failed to write file: {}", output_path.display()))?;
    Ok(())
}

/// Arrondit à `precision` décimales
pub(crate) fn round_to(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(i32::from(precision));
    (value * factor).round() / factor
}
