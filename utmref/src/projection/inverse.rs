//! Projection inverse : UTM → géographique

use tracing::trace;

use super::{central_meridian, radians_to_degrees};
use crate::ellipsoid::{wgs84, FALSE_EASTING, FALSE_NORTHING};
use crate::error::{ConversionError, Result};
use crate::types::{GeographicCoordinate, UtmCoordinate};

/// Dépassement toléré au-delà de ±90° (degrés)
const POLE_OVERSHOOT: f64 = 2e-5;

/// Convertit une coordonnée UTM en latitude/longitude (degrés)
///
/// La longitude est ramenée dans [-180, 180) : un easting tronqué en bord de
/// la zone 1 peut retomber à l'ouest de l'antiméridien.
///
/// # Errors
///
/// [`ConversionError::OutOfRange`] si le couple easting/northing ne correspond
/// à aucun point de l'ellipsoïde.
pub fn unproject(utm: &UtmCoordinate) -> Result<GeographicCoordinate> {
    let c = wgs84();
    let south = utm.band().is_southern();

    let northing = if south {
        FALSE_NORTHING - utm.northing()
    } else {
        utm.northing()
    };

    // Latitude du pied
    let phi1 = c.footpoint_latitude(northing / c.k0);
    let cos1 = phi1.cos();
    let tan1 = phi1.tan();

    let n0 = c.prime_vertical_radius(phi1);
    let r0 = c.meridional_radius(phi1);

    let offset = FALSE_EASTING - utm.easting();
    let dd0 = offset / (n0 * c.k0);
    let t0 = tan1 * tan1;
    let q0 = c.e1sq * cos1 * cos1;

    // Corrections en latitude
    let fact1 = n0 * tan1 / r0;
    let fact2 = dd0 * dd0 / 2.0;
    let fact3 = (5.0 + 3.0 * t0 + 10.0 * q0 - 4.0 * q0 * q0 - 9.0 * c.e1sq) * dd0.powi(4) / 24.0;
    let fact4 = (61.0 + 90.0 * t0 + 298.0 * q0 + 45.0 * t0 * t0 - 252.0 * c.e1sq - 3.0 * q0 * q0)
        * dd0.powi(6)
        / 720.0;

    // Corrections en longitude
    let lof1 = dd0;
    let lof2 = (1.0 + 2.0 * t0 + q0) * dd0.powi(3) / 6.0;
    let lof3 = (5.0 - 2.0 * q0 + 28.0 * t0 - 3.0 * q0 * q0 + 8.0 * c.e1sq + 24.0 * t0 * t0)
        * dd0.powi(5)
        / 120.0;

    let mut latitude = radians_to_degrees(phi1 - fact1 * (fact2 + fact3 + fact4));
    if south {
        latitude = -latitude;
    }
    // Au pôle, série et troncature au mètre dépassent ±90° de moins de 1e-5°
    if latitude.abs() > 90.0 && latitude.abs() - 90.0 <= POLE_OVERSHOOT {
        latitude = 90.0_f64.copysign(latitude);
    }

    let delta = radians_to_degrees((lof1 - lof2 + lof3) / cos1);
    let longitude = normalize_longitude(central_meridian(utm.zone()) - delta);

    trace!(
        zone = utm.zone(),
        band = %utm.band(),
        easting = utm.easting(),
        northing = utm.northing(),
        latitude,
        longitude,
        "projection inverse"
    );

    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(ConversionError::OutOfRange {
            latitude,
            longitude,
        });
    }
    GeographicCoordinate::new(latitude, longitude)
}

/// Ramène une longitude dans [-180, 180)
fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
