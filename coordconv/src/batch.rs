//! Conversion par lot : découpage du fichier en lignes puis conversion parallèle
//!
//! Une ligne invalide n'interrompt pas le lot : elle est reportée avec son
//! numéro et le message d'erreur, les autres lignes sont converties.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use memchr::memchr_iter;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utmref::{ConversionError, GeographicCoordinate, MgrsCoordinate, UtmCoordinate};

use crate::config::{BatchConfig, Notation};
use crate::export::{self, OutputFormat};
use crate::report::{BatchReport, RecordError};

/// Ligne brute du fichier d'entrée
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Numéro de ligne (à partir de 1)
    pub line: usize,
    /// Contenu sans le saut de ligne
    pub bytes: &'a [u8],
}

/// Ligne convertie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedRecord {
    pub line: usize,
    pub input: String,
    pub latitude: f64,
    pub longitude: f64,
    pub utm: String,
    pub mgrs: String,
    /// Valeur dans la notation demandée
    pub output: String,
}

/// Découpe le contenu en lignes à convertir
///
/// Les lignes vides et les commentaires (`#`) sont ignorés, ainsi que la
/// première ligne utile si `skip_header`. Les fins de ligne `\r\n` sont acceptées.
pub fn split_records(data: &[u8], skip_header: bool) -> Vec<RawRecord<'_>> {
    let mut records = Vec::new();
    let mut header_pending = skip_header;
    let mut start = 0;

    let ends = memchr_iter(b'\n', data).chain(std::iter::once(data.len()));
    for (index, end) in ends.enumerate() {
        let mut bytes = &data[start..end];
        start = end + 1;

        if let [rest @ .., b'\r'] = bytes {
            bytes = rest;
        }
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            None | Some(b'#') => continue,
            Some(_) => {}
        }
        if header_pending {
            header_pending = false;
            continue;
        }

        records.push(RawRecord {
            line: index + 1,
            bytes,
        });
    }

    records
}

/// Convertit les lignes en parallèle, dans l'ordre d'entrée
pub fn convert_records(
    records: &[RawRecord<'_>],
    config: &BatchConfig,
) -> Vec<std::result::Result<ConvertedRecord, RecordError>> {
    records
        .par_iter()
        .map(|record| convert_record(record, config))
        .collect()
}

/// Convertit une ligne
pub fn convert_record(
    record: &RawRecord<'_>,
    config: &BatchConfig,
) -> std::result::Result<ConvertedRecord, RecordError> {
    let text = match std::str::from_utf8(record.bytes) {
        Ok(text) => text.trim(),
        Err(e) => {
            return Err(RecordError {
                line: record.line,
                input: String::from_utf8_lossy(record.bytes).into_owned(),
                kind: "Encoding".to_string(),
                message: format!("Invalid UTF-8: {}", e),
            })
        }
    };

    convert_text(text, record.line, config).map_err(|e| RecordError {
        line: record.line,
        input: text.to_string(),
        kind: format!("{:?}", e.kind()),
        message: e.to_string(),
    })
}

fn convert_text(
    text: &str,
    line: usize,
    config: &BatchConfig,
) -> utmref::Result<ConvertedRecord> {
    let (geo, utm, mgrs) = match config.input {
        Notation::LatLon => {
            let geo = parse_lat_lon(text, config)?;
            let utm = geo.to_utm();
            let mgrs = utm.to_mgrs();
            (geo, utm, mgrs)
        }
        Notation::Utm => {
            let utm: UtmCoordinate = text.parse()?;
            (utm.to_geographic()?, utm, utm.to_mgrs())
        }
        Notation::Mgrs => {
            let mgrs: MgrsCoordinate = text.parse()?;
            let utm = mgrs.to_utm()?;
            (utm.to_geographic()?, utm, mgrs)
        }
    };

    let output = match config.output {
        Notation::LatLon => format_lat_lon(&geo, config),
        Notation::Utm => utm.to_string(),
        Notation::Mgrs => mgrs.to_string(),
    };

    Ok(ConvertedRecord {
        line,
        input: text.to_string(),
        latitude: geo.latitude(),
        longitude: geo.longitude(),
        utm: utm.to_string(),
        mgrs: mgrs.to_string(),
        output,
    })
}

/// Lit `"lat<sep>lon"` (ou `"lon<sep>lat"` si `lon_first`)
fn parse_lat_lon(text: &str, config: &BatchConfig) -> utmref::Result<GeographicCoordinate> {
    let format_err = |reason: String| ConversionError::Format {
        notation: "lat/lon",
        input: text.to_string(),
        reason,
    };

    // En-tête et commentaires sont déjà retirés par `split_records`
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte())
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut record = csv::StringRecord::new();
    if !reader
        .read_record(&mut record)
        .map_err(|e| format_err(e.to_string()))?
    {
        return Err(format_err("empty line".to_string()));
    }

    // Séparateur blanc : les espaces répétés ne créent pas de champ
    let collapse = config.delimiter.is_ascii_whitespace();
    let fields: Vec<&str> = record
        .iter()
        .filter(|field| !(collapse && field.is_empty()))
        .collect();
    let [first, second] = fields.as_slice() else {
        return Err(format_err(format!("expected 2 fields, found {}", fields.len())));
    };

    let number = |field: &str| match fast_float::parse::<f64, _>(field) {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format_err(format!("'{}' is not a number", field))),
    };
    let (first, second) = (number(*first)?, number(*second)?);

    if config.lon_first {
        GeographicCoordinate::new(second, first)
    } else {
        GeographicCoordinate::new(first, second)
    }
}

fn format_lat_lon(geo: &GeographicCoordinate, config: &BatchConfig) -> String {
    let precision = usize::from(config.precision);
    let (first, second) = if config.lon_first {
        (geo.longitude(), geo.latitude())
    } else {
        (geo.latitude(), geo.longitude())
    };
    format!(
        "{:.*}{}{:.*}",
        precision, first, config.delimiter, precision, second
    )
}

/// Convertit un fichier complet et écrit le résultat
///
/// Seules les erreurs d'entrée/sortie interrompent le lot.
pub fn run_batch(
    input: &Path,
    output: &Path,
    config: &BatchConfig,
    format: OutputFormat,
    jobs: usize,
) -> Result<BatchReport> {
    let start = Instant::now();

    let data = std::fs::read(input)
        .context(format!("Failed to read input file: {}", input.display()))?;
    let records = split_records(&data, config.skip_header);
    info!(
        input = %input.display(),
        records = records.len(),
        jobs,
        "Conversion {} → {}",
        config.input,
        config.output
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build thread pool")?;
    let results = pool.install(|| convert_records(&records, config));

    let mut report = BatchReport::new(input, output, config);
    let mut converted = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(record) => {
                report.record_success();
                converted.push(record);
            }
            Err(error) => {
                debug!(line = error.line, input = %error.input, "{}", error.message);
                report.record_error(error);
            }
        }
    }

    export::write_records(format, &converted, config, output)?;

    report.set_duration(start.elapsed());
    report.finalize();

    if report.records_failed > 0 {
        warn!("{} lines could not be converted", report.records_failed);
    }
    info!("{}", report.summary());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_config(input: Notation, output: Notation) -> BatchConfig {
        BatchConfig {
            input,
            output,
            delimiter: ',',
            skip_header: false,
            lon_first: false,
            precision: 4,
        }
    }

    fn record(line: usize, text: &str) -> RawRecord<'_> {
        RawRecord {
            line,
            bytes: text.as_bytes(),
        }
    }

    #[test]
    fn test_split_records() {
        let data = b"# points\r\n48.853,2.3498\r\n\r\n   \n0,0\n-33.8688,151.2093";
        let records = split_records(data, false);
        let lines: Vec<usize> = records.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 5, 6]);
        assert_eq!(records[0].bytes, b"48.853,2.3498");
        assert_eq!(records[2].bytes, b"-33.8688,151.2093");
    }

    #[test]
    fn test_split_records_skip_header() {
        let data = b"\nlat,lon\n1,2\n3,4\n";
        let records = split_records(data, true);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[0].bytes, b"1,2");
    }

    #[test]
    fn test_split_records_empty() {
        assert!(split_records(b"", false).is_empty());
        assert!(split_records(b"\n\n", true).is_empty());
    }

    #[test]
    fn test_convert_lat_lon_to_mgrs() {
        let config = batch_config(Notation::LatLon, Notation::Mgrs);
        let converted = convert_record(&record(1, " 48.853, 2.3498 "), &config).unwrap();
        assert_eq!(converted.input, "48.853, 2.3498");
        assert_eq!(converted.output, "31UDQ5230311318");
        assert_eq!(converted.mgrs, converted.output);
        assert_eq!(converted.utm, "31 U 452303 5411318");
    }

    #[test]
    fn test_convert_lon_first() {
        let mut config = batch_config(Notation::LatLon, Notation::Utm);
        config.lon_first = true;
        config.delimiter = ' ';
        let converted = convert_record(&record(1, "2.3498   48.853"), &config).unwrap();
        assert_eq!(converted.output, "31 U 452303 5411318");
        assert!((converted.latitude - 48.853).abs() < 1e-12);
    }

    #[test]
    fn test_convert_quoted_fields() {
        let mut config = batch_config(Notation::LatLon, Notation::Mgrs);
        config.delimiter = ';';
        let converted = convert_record(&record(1, "\"48.853\";\"2.3498\""), &config).unwrap();
        assert_eq!(converted.output, "31UDQ5230311318");

        let err = convert_record(&record(2, "48.853;2.3498;12"), &config).unwrap_err();
        assert_eq!(err.kind, "Format");
        assert!(err.message.contains("expected 2 fields, found 3"), "{}", err.message);
    }

    #[test]
    fn test_convert_mgrs_to_lat_lon() {
        let config = batch_config(Notation::Mgrs, Notation::LatLon);
        let converted = convert_record(&record(7, "31NAA6602100000"), &config).unwrap();
        assert_eq!(converted.line, 7);
        let fields: Vec<f64> = converted
            .output
            .split(',')
            .map(|f| f.parse().unwrap())
            .collect();
        assert_eq!(fields.len(), 2);
        assert!(fields[0].abs() < 1e-4 && fields[1].abs() < 1e-4, "{}", converted.output);
        assert_eq!(converted.utm, "31 N 166021 0");
    }

    #[test]
    fn test_convert_utm_to_mgrs() {
        let config = batch_config(Notation::Utm, Notation::Mgrs);
        let converted = convert_record(&record(1, "31 U 452303 5411318"), &config).unwrap();
        assert_eq!(converted.output, "31UDQ5230311318");
    }

    #[test]
    fn test_convert_errors() {
        let config = batch_config(Notation::LatLon, Notation::Mgrs);

        let err = convert_record(&record(3, "48.853"), &config).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, "Format");

        let err = convert_record(&record(4, "abc,2.0"), &config).unwrap_err();
        assert_eq!(err.kind, "Format");

        let err = convert_record(&record(5, "91,0"), &config).unwrap_err();
        assert_eq!(err.kind, "Range");

        let err = convert_record(&record(6, "inf,0"), &config).unwrap_err();
        assert_eq!(err.kind, "Format");

        let bytes: &[u8] = &[0xff, 0xfe, b',', b'0'];
        let err = convert_record(&RawRecord { line: 8, bytes }, &config).unwrap_err();
        assert_eq!(err.kind, "Encoding");

        let config = batch_config(Notation::Mgrs, Notation::LatLon);
        let err = convert_record(&record(9, "31IAA6602100000"), &config).unwrap_err();
        assert_eq!(err.kind, "Domain");
    }

    #[test]
    fn test_convert_records_keeps_order() {
        let config = batch_config(Notation::LatLon, Notation::Mgrs);
        let lines: Vec<String> = (0..200)
            .map(|i| format!("{},{}", -60.0 + i as f64 * 0.6, -170.0 + i as f64 * 1.7))
            .collect();
        let records: Vec<RawRecord<'_>> = lines
            .iter()
            .enumerate()
            .map(|(i, text)| record(i + 1, text))
            .collect();

        let results = convert_records(&records, &config);
        assert_eq!(results.len(), 200);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.as_ref().unwrap().line, i + 1);
        }
    }
}
