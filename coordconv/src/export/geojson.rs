//! Sortie GeoJSON : une FeatureCollection de points en WGS84

use std::io::Write;

use anyhow::Result;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};

use super::round_to;
use crate::batch::ConvertedRecord;
use crate::config::BatchConfig;

/// Écrit les lignes converties en FeatureCollection
pub fn write_geojson<W: Write>(
    writer: &mut W,
    records: &[ConvertedRecord],
    config: &BatchConfig,
) -> Result<()> {
    let collection = FeatureCollection {
        bbox: None,
        features: records
            .iter()
            .map(|record| to_feature(record, config.precision))
            .collect(),
        foreign_members: None,
    };

    serde_json::to_writer(&mut *writer, &collection)?;
    writeln!(writer)?;
    Ok(())
}

/// Point GeoJSON d'une ligne, avec UTM et MGRS en propriétés
fn to_feature(record: &ConvertedRecord, precision: u8) -> Feature {
    let point = geo::Point::new(
        round_to(record.longitude, precision),
        round_to(record.latitude, precision),
    );

    let mut properties = JsonObject::new();
    properties.insert("line".to_string(), record.line.into());
    properties.insert("input".to_string(), record.input.clone().into());
    properties.insert("utm".to_string(), record.utm.clone().into());
    properties.insert("mgrs".to_string(), record.mgrs.clone().into());
    properties.insert("output".to_string(), record.output.clone().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
        id: Some(Id::Number(record.line.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}
