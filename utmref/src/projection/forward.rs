//! Projection directe : géographique → UTM

use tracing::trace;

use super::{central_meridian, degrees_to_radians, validate, zone_number, ARC_SECOND};
use crate::bands::LatitudeBand;
use crate::ellipsoid::{wgs84, FALSE_EASTING, FALSE_NORTHING};
use crate::error::Result;
use crate::types::UtmCoordinate;

/// Projette une latitude/longitude (degrés) en coordonnées UTM
///
/// # Errors
///
/// [`crate::ConversionError::OutOfRange`] si latitude ∉ [-90, 90] ou longitude ∉ [-180, 180).
pub fn project(latitude: f64, longitude: f64) -> Result<UtmCoordinate> {
    validate(latitude, longitude)?;
    Ok(project_point(latitude, longitude))
}

/// Projection d'un point déjà validé
pub(crate) fn project_point(latitude: f64, longitude: f64) -> UtmCoordinate {
    let c = wgs84();
    let zone = zone_number(longitude);

    // Écart au méridien central, en unités de 10 000"
    let p = (longitude - central_meridian(zone)) * 3600.0 / 10_000.0;

    let phi = degrees_to_radians(latitude);
    let (sin, cos) = phi.sin_cos();
    let tan2 = phi.tan().powi(2);
    let nu = c.prime_vertical_radius(phi);
    let s = c.meridian_arc(phi);

    let k1 = s * c.k0;
    let k2 = nu * sin * cos * ARC_SECOND.powi(2) * c.k0 * 1e8 / 2.0;
    let k3 = ARC_SECOND.powi(4) * nu * sin * cos.powi(3) / 24.0
        * (5.0 - tan2 + 9.0 * c.e1sq * cos.powi(2) + 4.0 * c.e1sq.powi(2) * cos.powi(4))
        * c.k0
        * 1e16;
    let k4 = nu * cos * ARC_SECOND * c.k0 * 1e4;
    let k5 = (ARC_SECOND * cos).powi(3) * nu / 6.0 * (1.0 - tan2 + c.e1sq * cos.powi(2)) * c.k0 * 1e12;

    let easting = FALSE_EASTING + k4 * p + k5 * p.powi(3);
    let mut northing = k1 + k2 * p * p + k3 * p.powi(4);
    if latitude < 0.0 {
        northing += FALSE_NORTHING;
    }

    let band = LatitudeBand::for_latitude(latitude);
    trace!(latitude, longitude, zone, band = %band, easting, northing, "projection directe");

    UtmCoordinate::from_parts(zone, band, easting, northing)
}
