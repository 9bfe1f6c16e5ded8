//! Sortie CSV

use std::io::Write;

use anyhow::Result;

use crate::batch::ConvertedRecord;
use crate::config::BatchConfig;

/// Écrit une ligne d'en-tête puis une ligne par point
///
/// Colonnes : `line, input, latitude, longitude, utm, mgrs, <notation de sortie>`.
pub fn write_csv<W: Write>(
    writer: &mut W,
    records: &[ConvertedRecord],
    config: &BatchConfig,
) -> Result<()> {
    let precision = usize::from(config.precision);
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte())
        .has_headers(false)
        .from_writer(writer);

    let output_column = config.output.to_string();
    csv_writer.write_record([
        "line",
        "input",
        "latitude",
        "longitude",
        "utm",
        "mgrs",
        output_column.as_str(),
    ])?;

    for record in records {
        csv_writer.write_record([
            record.line.to_string().as_str(),
            record.input.as_str(),
            format!("{:.*}", precision, record.latitude).as_str(),
            format!("{:.*}", precision, record.longitude).as_str(),
            record.utm.as_str(),
            record.mgrs.as_str(),
            record.output.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
