//! Sortie JSON (tableau de lignes converties)

use std::io::Write;

use anyhow::Result;

use super::round_to;
use crate::batch::ConvertedRecord;
use crate::config::BatchConfig;

/// Écrit les lignes sous forme de tableau JSON indenté
pub fn write_json<W: Write>(
    writer: &mut W,
    records: &[ConvertedRecord],
    config: &BatchConfig,
) -> Result<()> {
    let rounded: Vec<ConvertedRecord> = records
        .iter()
        .map(|record| ConvertedRecord {
            latitude: round_to(record.latitude, config.precision),
            longitude: round_to(record.longitude, config.precision),
            ..record.clone()
        })
        .collect();

    serde_json::to_writer_pretty(&mut *writer, &rounded)?;
    writeln!(writer)?;
    Ok(())
}
