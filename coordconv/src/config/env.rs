//! Réglages d'exécution du lot : option de ligne de commande, puis variable
//! d'environnement, puis valeur par défaut

use std::path::Path;

use tracing::warn;

use crate::export::OutputFormat;

/// Variable d'environnement : nombre de threads du lot
pub const JOBS_ENV: &str = "COORDCONV_JOBS";

/// Variable d'environnement : format de sortie par défaut
pub const FORMAT_ENV: &str = "COORDCONV_FORMAT";

/// Format : option, puis `COORDCONV_FORMAT`, puis extension du fichier, puis CSV
///
/// Une valeur d'environnement inconnue est ignorée.
pub fn resolve_format(
    format: Option<OutputFormat>,
    env_value: Option<&str>,
    output: &Path,
) -> OutputFormat {
    if let Some(format) = format {
        return format;
    }
    if let Some(value) = env_value {
        match value.parse() {
            Ok(format) => return format,
            Err(e) => warn!("Ignoring {}: {}", FORMAT_ENV, e),
        }
    }
    OutputFormat::from_extension(output).unwrap_or(OutputFormat::Csv)
}

/// Threads : option, puis `COORDCONV_JOBS`, puis nombre de CPU
///
/// Une valeur d'environnement nulle ou non numérique est ignorée.
pub fn resolve_jobs(jobs: Option<usize>, env_value: Option<&str>) -> usize {
    jobs.or_else(|| {
        let value = env_value?;
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                warn!("Ignoring {}={:?}: expected a positive integer", JOBS_ENV, value);
                None
            }
        }
    })
    .unwrap_or_else(default_jobs)
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
