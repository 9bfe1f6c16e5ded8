//! Configuration d'une conversion par lot

mod env;

pub use env::{resolve_format, resolve_jobs, FORMAT_ENV, JOBS_ENV};

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Presets embarqués
pub const PRESETS: [&str; 4] = [
    "latlon-to-mgrs",
    "latlon-to-utm",
    "mgrs-to-latlon",
    "utm-to-latlon",
];

/// Notation d'une coordonnée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// Paire latitude/longitude en degrés
    LatLon,
    /// `"<zone> <bande> <easting> <northing>"`
    Utm,
    /// Référence MGRS sur 15 caractères
    Mgrs,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Notation::LatLon => "latlon",
            Notation::Utm => "utm",
            Notation::Mgrs => "mgrs",
        };
        f.write_str(name)
    }
}

/// Configuration d'un lot
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Notation des lignes lues
    pub input: Notation,

    /// Notation produite
    pub output: Notation,

    /// Séparateur des champs lat/lon (et des colonnes CSV en sortie)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Ignorer la première ligne non vide
    #[serde(default)]
    pub skip_header: bool,

    /// Colonnes dans l'ordre longitude puis latitude
    #[serde(default)]
    pub lon_first: bool,

    /// Décimales des latitudes/longitudes écrites
    #[serde(default = "default_precision")]
    pub precision: u8,
}

fn default_delimiter() -> char {
    ','
}

fn default_precision() -> u8 {
    7
}

impl BatchConfig {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "latlon-to-mgrs" => Self::load_embedded(include_str!("presets/latlon-to-mgrs.json")),
            "latlon-to-utm" => Self::load_embedded(include_str!("presets/latlon-to-utm.json")),
            "mgrs-to-latlon" => Self::load_embedded(include_str!("presets/mgrs-to-latlon.json")),
            "utm-to-latlon" => Self::load_embedded(include_str!("presets/utm-to-latlon.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: {}", preset, PRESETS.join(", ")),
        }
    }

    /// Preset si le nom en est un, sinon chemin d'un fichier JSON
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        if PRESETS.contains(&name_or_path) {
            Self::from_preset(name_or_path)
        } else {
            Self::load(Path::new(name_or_path))
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Séparateur en octet pour le lecteur/écrivain CSV
    ///
    /// Le séparateur est ASCII une fois la configuration validée.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }

    /// Vérifie la cohérence des options
    pub fn validate(&self) -> Result<()> {
        if self.input == self.output {
            anyhow::bail!("Input and output notations are both '{}'", self.input);
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            anyhow::bail!("Invalid delimiter {:?}: expected a single ASCII character", self.delimiter);
        }
        // Au-delà, f64 n'a plus de chiffres significatifs
        if self.precision > 15 {
            anyhow::bail!("Precision {} exceeds 15 decimals", self.precision);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        for name in PRESETS {
            let config = BatchConfig::from_preset(name).unwrap();
            config.validate().unwrap();
        }

        let config = BatchConfig::from_preset("latlon-to-mgrs").unwrap();
        assert_eq!(config.input, Notation::LatLon);
        assert_eq!(config.output, Notation::Mgrs);
        assert_eq!(config.delimiter, ',');
        assert!(!config.lon_first);
    }

    #[test]
    fn test_unknown_preset() {
        let err = BatchConfig::from_preset("lambert93").unwrap_err();
        assert!(err.to_string().contains("Unknown preset"));
    }

    #[test]
    fn test_defaults() {
        let config: BatchConfig =
            serde_json::from_str(r#"{"input": "utm", "output": "mgrs"}"#).unwrap();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.precision, 7);
        assert!(!config.skip_header);
    }

    #[test]
    fn test_validate() {
        let mut config = BatchConfig::from_preset("latlon-to-utm").unwrap();
        config.output = Notation::LatLon;
        assert!(config.validate().is_err());

        let mut config = BatchConfig::from_preset("latlon-to-utm").unwrap();
        config.precision = 20;
        assert!(config.validate().is_err());

        let mut config = BatchConfig::from_preset("latlon-to-utm").unwrap();
        config.delimiter = '§';
        assert!(config.validate().is_err());
        config.delimiter = ';';
        config.validate().unwrap();
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn test_resolve_missing_file() {
        assert!(BatchConfig::resolve("/nonexistent/config.json").is_err());
    }
}
