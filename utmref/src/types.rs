//! Types de coordonnées : géographique, UTM, MGRS
//!
//! Chaque valeur est validée à la construction et n'est plus modifiée ensuite.

use std::fmt;
use std::str::FromStr;

use crate::bands::LatitudeBand;
use crate::ellipsoid::FALSE_NORTHING;
use crate::error::{ConversionError, Result};
use crate::{grid, projection};

/// Easting maximal accepté (m)
const MAX_EASTING: f64 = 1_000_000.0;

/// Côté d'un carré MGRS (m)
pub const SQUARE_SIZE: u32 = 100_000;

/// Point géographique en degrés
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeographicCoordinate {
    /// Crée un point, latitude ∈ [-90, 90] et longitude ∈ [-180, 180)
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        projection::validate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude en degrés
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude en degrés
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Projection UTM du point
    pub fn to_utm(&self) -> UtmCoordinate {
        projection::project_point(self.latitude, self.longitude)
    }

    /// Référence MGRS du point
    pub fn to_mgrs(&self) -> MgrsCoordinate {
        grid::encode(&self.to_utm())
    }
}

impl fmt::Display for GeographicCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.latitude, self.longitude)
    }
}

impl FromStr for GeographicCoordinate {
    type Err = ConversionError;

    /// Accepte `"lat lon"` ou `"lat,lon"`
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        let [lat, lon] = fields.as_slice() else {
            return Err(ConversionError::Format {
                notation: "lat/lon",
                input: s.to_string(),
                reason: format!("expected 2 fields, found {}", fields.len()),
            });
        };
        let parse = |field: &str, name: &str| {
            parse_number(field).ok_or_else(|| ConversionError::Format {
                notation: "lat/lon",
                input: s.to_string(),
                reason: format!("{} is not a number", name),
            })
        };
        Self::new(parse(*lat, "latitude")?, parse(*lon, "longitude")?)
    }
}

impl From<GeographicCoordinate> for geo::Point<f64> {
    fn from(coord: GeographicCoordinate) -> Self {
        geo::Point::new(coord.longitude, coord.latitude)
    }
}

impl TryFrom<geo::Point<f64>> for GeographicCoordinate {
    type Error = ConversionError;

    fn try_from(point: geo::Point<f64>) -> Result<Self> {
        Self::new(point.y(), point.x())
    }
}

/// Coordonnée UTM (zone, bande, easting, northing en mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    zone: u8,
    band: LatitudeBand,
    easting: f64,
    northing: f64,
}

impl UtmCoordinate {
    /// Crée une coordonnée UTM validée
    ///
    /// # Errors
    ///
    /// - [`ConversionError::Format`] : zone hors de 1..=60, easting/northing non finis ou hors plage
    /// - [`ConversionError::UnknownBand`] : lettre absente de la table des bandes
    pub fn new(zone: u8, band: char, easting: f64, northing: f64) -> Result<Self> {
        let input = format!("{} {} {} {}", zone, band, easting, northing);
        let zone = check_zone(i64::from(zone), || ConversionError::utm_format(&input, zone_reason()))?;
        let band = LatitudeBand::from_letter(band)?;
        Self::checked(zone, band, easting, northing, &input)
    }

    /// Construit sans validation (sortie de la projection directe)
    pub(crate) fn from_parts(zone: u8, band: LatitudeBand, easting: f64, northing: f64) -> Self {
        Self {
            zone,
            band,
            easting,
            northing,
        }
    }

    fn checked(zone: u8, band: LatitudeBand, easting: f64, northing: f64, input: &str) -> Result<Self> {
        if !easting.is_finite() || !(0.0..=MAX_EASTING).contains(&easting) {
            return Err(ConversionError::utm_format(input, "easting out of range"));
        }
        if !northing.is_finite() || !(0.0..=FALSE_NORTHING).contains(&northing) {
            return Err(ConversionError::utm_format(input, "northing out of range"));
        }
        Ok(Self::from_parts(zone, band, easting, northing))
    }

    /// Numéro de zone (1..=60)
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Bande de latitude
    pub fn band(&self) -> LatitudeBand {
        self.band
    }

    /// Easting en mètres
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Northing en mètres (false northing inclus au sud)
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Latitude/longitude du point
    pub fn to_geographic(&self) -> Result<GeographicCoordinate> {
        projection::unproject(self)
    }

    /// Référence MGRS du point
    pub fn to_mgrs(&self) -> MgrsCoordinate {
        grid::encode(self)
    }
}

impl fmt::Display for UtmCoordinate {
    /// Forme canonique `"<zone> <bande> <easting> <northing>"`, mètres tronqués
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02} {} {} {}",
            self.zone,
            self.band,
            self.easting.trunc() as i64,
            self.northing.trunc() as i64
        )
    }
}

impl FromStr for UtmCoordinate {
    type Err = ConversionError;

    /// Découpe strictement sur un espace simple en 4 champs
    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split(' ').collect();
        let [zone, band, easting, northing] = tokens.as_slice() else {
            return Err(ConversionError::utm_format(
                s,
                format!("expected 4 space-separated fields, found {}", tokens.len()),
            ));
        };

        let zone = zone
            .parse::<i64>()
            .map_err(|_| ConversionError::utm_format(s, "zone is not an integer"))?;
        let zone = check_zone(zone, || ConversionError::utm_format(s, zone_reason()))?;

        let mut letters = band.chars();
        let band = match (letters.next(), letters.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => LatitudeBand::from_letter(letter)?,
            _ => return Err(ConversionError::utm_format(s, "band must be a single letter")),
        };

        let easting = parse_number(easting)
            .ok_or_else(|| ConversionError::utm_format(s, "easting is not a number"))?;
        let northing = parse_number(northing)
            .ok_or_else(|| ConversionError::utm_format(s, "northing is not a number"))?;

        Self::checked(zone, band, easting, northing, s)
    }
}

/// Référence MGRS : zone, bande, digraphe et décalages dans le carré de 100 km
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MgrsCoordinate {
    zone: u8,
    band: LatitudeBand,
    column: char,
    row: char,
    easting_offset: u32,
    northing_offset: u32,
}

impl MgrsCoordinate {
    /// Crée une référence MGRS validée
    ///
    /// # Errors
    ///
    /// - [`ConversionError::Format`] : zone hors de 1..=60 ou décalage ≥ 100 000
    /// - [`ConversionError::UnknownBand`] / [`ConversionError::UnknownGridLetter`] :
    ///   lettre absente des tables
    pub fn new(
        zone: u8,
        band: char,
        column: char,
        row: char,
        easting_offset: u32,
        northing_offset: u32,
    ) -> Result<Self> {
        let input = format!(
            "{:02}{}{}{}{:05}{:05}",
            zone, band, column, row, easting_offset, northing_offset
        );
        let zone = check_zone(i64::from(zone), || ConversionError::mgrs_format(&input, zone_reason()))?;
        let band = LatitudeBand::from_letter(band)?;
        if easting_offset >= SQUARE_SIZE || northing_offset >= SQUARE_SIZE {
            return Err(ConversionError::mgrs_format(&input, "offsets must be below 100000"));
        }
        grid::digraph::column_index(zone, column)?;
        grid::digraph::row_position(zone, row)?;

        Ok(Self::from_parts(zone, band, column, row, easting_offset, northing_offset))
    }

    pub(crate) fn from_parts(
        zone: u8,
        band: LatitudeBand,
        column: char,
        row: char,
        easting_offset: u32,
        northing_offset: u32,
    ) -> Self {
        Self {
            zone,
            band,
            column,
            row,
            easting_offset,
            northing_offset,
        }
    }

    /// Numéro de zone (1..=60)
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Bande de latitude
    pub fn band(&self) -> LatitudeBand {
        self.band
    }

    /// Lettre de colonne du carré de 100 km
    pub fn column(&self) -> char {
        self.column
    }

    /// Lettre de ligne du carré de 100 km
    pub fn row(&self) -> char {
        self.row
    }

    /// Easting dans le carré (m)
    pub fn easting_offset(&self) -> u32 {
        self.easting_offset
    }

    /// Northing dans le carré (m)
    pub fn northing_offset(&self) -> u32 {
        self.northing_offset
    }

    /// Reconstitue la coordonnée UTM complète
    pub fn to_utm(&self) -> Result<UtmCoordinate> {
        grid::decode(self)
    }

    /// Latitude/longitude du point
    pub fn to_geographic(&self) -> Result<GeographicCoordinate> {
        self.to_utm()?.to_geographic()
    }
}

impl fmt::Display for MgrsCoordinate {
    /// Forme canonique sur 15 caractères
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{}{}{}{:05}{:05}",
            self.zone, self.band, self.column, self.row, self.easting_offset, self.northing_offset
        )
    }
}

impl FromStr for MgrsCoordinate {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        grid::parse(s)
    }
}

/// Vérifie qu'un numéro de zone est dans 1..=60
pub(crate) fn check_zone(zone: i64, err: impl FnOnce() -> ConversionError) -> Result<u8> {
    if (1..=i64::from(projection::ZONE_COUNT)).contains(&zone) {
        Ok(zone as u8)
    } else {
        Err(err())
    }
}

pub(crate) fn zone_reason() -> &'static str {
    "zone must be in 1..=60"
}

/// Parse un nombre fini
fn parse_number(field: &str) -> Option<f64> {
    fast_float::parse::<f64, _>(field)
        .ok()
        .filter(|value| value.is_finite())
}
