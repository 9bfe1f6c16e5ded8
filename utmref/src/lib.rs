//! # utmref
//!
//! Conversion de coordonnées entre latitude/longitude (WGS84), UTM et MGRS.
//!
//! ## Features
//!
//! - Projection transverse de Mercator directe et inverse (séries, coefficients
//!   dérivés une fois de l'ellipsoïde)
//! - Numéros de zone et bandes de latitude UTM
//! - Encodage/décodage des références MGRS (digraphe de 100 km)
//! - Types `geo` pour l'interopérabilité avec l'écosystème Rust géospatial
//!
//! ## Usage
//!
//! ```rust
//! let utm = utmref::lat_lon_to_utm(0.0, 0.0)?;
//! assert_eq!(utm, "31 N 166021 0");
//!
//! let mgrs = utmref::lat_lon_to_mgrs(0.0, 0.0)?;
//! assert_eq!(mgrs, "31NAA6602100000");
//!
//! let (lat, lon) = utmref::mgrs_to_lat_lon(&mgrs)?;
//! assert!(lat.abs() < 1e-3 && lon.abs() < 1e-3);
//! # Ok::<(), utmref::ConversionError>(())
//! ```
//!
//! Toutes les fonctions sont pures et réentrantes.

pub mod bands;
pub mod ellipsoid;
pub mod error;
pub mod grid;
pub mod projection;
pub mod types;

pub use bands::{band_for_latitude, degrees_for_band, is_southern_band, LatitudeBand};
pub use ellipsoid::{Ellipsoid, ProjectionConstants};
pub use error::{ConversionError, ErrorKind, Result};
pub use projection::{
    central_meridian, degrees_to_radians, project, radians_to_degrees, unproject, validate,
    zone_number,
};
pub use types::{GeographicCoordinate, MgrsCoordinate, UtmCoordinate};

use tracing::debug;

/// Convertit latitude/longitude (degrés) en UTM `"<zone> <bande> <easting> <northing>"`
///
/// # Errors
///
/// [`ConversionError::OutOfRange`] si latitude ∉ [-90, 90] ou longitude ∉ [-180, 180).
pub fn lat_lon_to_utm(latitude: f64, longitude: f64) -> Result<String> {
    let utm = project(latitude, longitude)?.to_string();
    debug!(latitude, longitude, utm = %utm, "lat/lon → UTM");
    Ok(utm)
}

/// Convertit un texte UTM en `(latitude, longitude)`
///
/// Le texte est découpé strictement sur des espaces simples en 4 champs.
///
/// La longitude rendue est dans [-180, 180) : un point saisi à -180° peut
/// revenir à +179.9999…° (même méridien, à comparer modulo 360).
///
/// # Errors
///
/// [`ConversionError::Format`] pour un texte mal formé,
/// [`ConversionError::UnknownBand`] pour une bande inconnue.
pub fn utm_to_lat_lon(utm: &str) -> Result<(f64, f64)> {
    let geo = utm.parse::<UtmCoordinate>()?.to_geographic()?;
    debug!(utm, latitude = geo.latitude(), longitude = geo.longitude(), "UTM → lat/lon");
    Ok((geo.latitude(), geo.longitude()))
}

/// Convertit latitude/longitude (degrés) en référence MGRS sur 15 caractères
///
/// # Errors
///
/// [`ConversionError::OutOfRange`] si latitude ∉ [-90, 90] ou longitude ∉ [-180, 180).
pub fn lat_lon_to_mgrs(latitude: f64, longitude: f64) -> Result<String> {
    let mgrs = GeographicCoordinate::new(latitude, longitude)?
        .to_mgrs()
        .to_string();
    debug!(latitude, longitude, mgrs = %mgrs, "lat/lon → MGRS");
    Ok(mgrs)
}

/// Convertit une référence MGRS en `(latitude, longitude)`
///
/// Comme pour [`utm_to_lat_lon`], la longitude est ramenée dans [-180, 180).
///
/// # Errors
///
/// [`ConversionError::Format`] pour une référence mal formée,
/// [`ConversionError::UnknownBand`] / [`ConversionError::UnknownGridLetter`]
/// pour une lettre hors des tables.
pub fn mgrs_to_lat_lon(mgrs: &str) -> Result<(f64, f64)> {
    let geo = mgrs.parse::<MgrsCoordinate>()?.to_geographic()?;
    debug!(mgrs, latitude = geo.latitude(), longitude = geo.longitude(), "MGRS → lat/lon");
    Ok((geo.latitude(), geo.longitude()))
}
