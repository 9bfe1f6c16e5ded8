//! Rapport de conversion par lot avec graceful degradation
//!
//! Les lignes invalides sont collectées ici avec leur numéro et leur message ;
//! le lot continue sur les lignes suivantes.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::BatchConfig;

/// Statut global du lot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Toutes les lignes converties
    #[default]
    Success,
    /// Certaines lignes rejetées
    PartialSuccess,
    /// Aucune ligne convertie
    Failed,
}

/// Ligne rejetée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordError {
    /// Numéro de ligne dans le fichier d'entrée
    pub line: usize,
    /// Texte de la ligne
    pub input: String,
    /// Catégorie (Range, Format, Domain, Encoding)
    pub kind: String,
    /// Message d'erreur
    pub message: String,
}

/// Rapport complet d'un lot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub input: String,
    pub output: String,
    /// Conversion effectuée, ex. `latlon → mgrs`
    pub conversion: String,
    pub status: BatchStatus,
    pub duration_secs: f64,
    pub records_total: usize,
    pub records_converted: usize,
    pub records_failed: usize,
    /// Nombre d'erreurs par catégorie
    pub by_kind: HashMap<String, usize>,
    pub errors: Vec<RecordError>,
}

impl BatchReport {
    pub fn new(input: &Path, output: &Path, config: &BatchConfig) -> Self {
        Self {
            input: input.display().to_string(),
            output: output.display().to_string(),
            conversion: format!("{} → {}", config.input, config.output),
            ..Default::default()
        }
    }

    /// Enregistre une ligne convertie
    pub fn record_success(&mut self) {
        self.records_total += 1;
        self.records_converted += 1;
    }

    /// Enregistre une ligne rejetée
    pub fn record_error(&mut self, error: RecordError) {
        self.records_total += 1;
        self.records_failed += 1;
        *self.by_kind.entry(error.kind.clone()).or_default() += 1;
        self.errors.push(error);
    }

    /// Définit la durée du lot
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.errors.sort_by_key(|e| e.line);

        self.status = match (self.records_converted, self.records_failed) {
            (_, 0) => BatchStatus::Success,
            (0, _) => BatchStatus::Failed,
            _ => BatchStatus::PartialSuccess,
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT - {}", self.conversion);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!("Input: {}", self.input);
        println!("Output: {}", self.output);

        println!("\n--- SUMMARY ---");
        println!(
            "Lines: {} read, {} converted, {} failed",
            self.records_total, self.records_converted, self.records_failed
        );

        if !self.by_kind.is_empty() {
            println!("\n--- BY KIND ---");
            let mut kinds: Vec<_> = self.by_kind.iter().collect();
            kinds.sort_by_key(|(k, _)| k.as_str());
            for (kind, count) in kinds {
                println!("  {}: {}", kind, count);
            }
        }

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                println!("  [line {}] {:?}: {}", e.line, e.input, e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} converted, {} failed ({:?})",
            self.conversion, self.records_converted, self.records_failed, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(line: usize, kind: &str) -> RecordError {
        RecordError {
            line,
            input: "bad".to_string(),
            kind: kind.to_string(),
            message: "Invalid".to_string(),
        }
    }

    #[test]
    fn test_batch_report_default() {
        let report = BatchReport::default();
        assert_eq!(report.status, BatchStatus::Success);
        assert_eq!(report.records_total, 0);
    }

    #[test]
    fn test_new() {
        let config = BatchConfig::from_preset("mgrs-to-latlon").unwrap();
        let report = BatchReport::new(Path::new("in.txt"), Path::new("out.csv"), &config);
        assert_eq!(report.conversion, "mgrs → latlon");
        assert_eq!(report.input, "in.txt");
    }

    #[test]
    fn test_record_error() {
        let mut report = BatchReport::default();
        report.record_success();
        report.record_error(error(3, "Format"));
        report.record_error(error(5, "Format"));
        report.record_error(error(4, "Range"));

        assert_eq!(report.records_total, 4);
        assert_eq!(report.records_failed, 3);
        assert_eq!(report.by_kind.get("Format"), Some(&2));
        assert_eq!(report.by_kind.get("Range"), Some(&1));
    }

    #[test]
    fn test_finalize() {
        let mut report = BatchReport::default();
        report.record_success();
        report.finalize();
        assert_eq!(report.status, BatchStatus::Success);

        report.record_error(error(9, "Domain"));
        report.record_error(error(2, "Format"));
        report.finalize();
        assert_eq!(report.status, BatchStatus::PartialSuccess);
        assert_eq!(report.errors[0].line, 2);

        let mut report = BatchReport::default();
        report.record_error(error(1, "Range"));
        report.finalize();
        assert_eq!(report.status, BatchStatus::Failed);
    }

    #[test]
    fn test_summary() {
        let mut report = BatchReport {
            conversion: "latlon → utm".to_string(),
            ..Default::default()
        };
        report.record_success();
        report.finalize();
        assert_eq!(report.summary(), "latlon → utm: 1 converted, 0 failed (Success)");
    }
}
