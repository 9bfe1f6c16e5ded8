//! Moteur de projection transverse de Mercator (UTM)
//!
//! - [`project`] : latitude/longitude → zone, bande, easting, northing
//! - [`unproject`] : zone, bande, easting, northing → latitude/longitude
//!
//! Les deux transformations sont des séries tronquées dont les coefficients
//! viennent de [`crate::ellipsoid::wgs84`].

mod forward;
mod inverse;

pub use forward::project;
pub(crate) use forward::project_point;
pub use inverse::unproject;

use crate::error::{ConversionError, Result};

/// Un arc-seconde en radians
pub const ARC_SECOND: f64 = std::f64::consts::PI / 648_000.0;

/// Nombre de zones UTM
pub const ZONE_COUNT: u8 = 60;

/// Convertit des degrés en radians
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convertit des radians en degrés
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Vérifie latitude ∈ [-90, 90] et longitude ∈ [-180, 180)
pub fn validate(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..180.0).contains(&longitude) {
        return Err(ConversionError::OutOfRange {
            latitude,
            longitude,
        });
    }
    Ok(())
}

/// Numéro de zone UTM pour une longitude valide
///
/// Le découpage est asymétrique autour du méridien de Greenwich :
/// `floor(lon/6) + 31` à l'est, `floor((180+lon)/6) + 1` à l'ouest.
pub fn zone_number(longitude: f64) -> u8 {
    let zone = if longitude < 0.0 {
        ((180.0 + longitude) / 6.0).floor() + 1.0
    } else {
        (longitude / 6.0).floor() + 31.0
    };
    zone as u8
}

/// Méridien central d'une zone (degrés)
pub fn central_meridian(zone: u8) -> f64 {
    6.0 * f64::from(zone) - 183.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversions_are_inverse() {
        for deg in [-180.0_f64, -90.0, -33.3, 0.0, 1e-9, 45.0, 179.999] {
            let back = radians_to_degrees(degrees_to_radians(deg));
            assert!((back - deg).abs() <= 4.0 * f64::EPSILON * deg.abs().max(1.0), "deg={}", deg);
        }
        assert!((degrees_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn test_arc_second() {
        assert!((ARC_SECOND - 4.84814e-6).abs() < 1e-11);
    }

    #[test]
    fn test_validate() {
        assert!(validate(0.0, 0.0).is_ok());
        assert!(validate(90.0, -180.0).is_ok());
        assert!(validate(-90.0, 179.999999).is_ok());
        assert!(validate(91.0, 0.0).is_err());
        assert!(validate(0.0, 180.0).is_err());
        assert!(validate(0.0, -180.1).is_err());
        assert!(validate(f64::NAN, 0.0).is_err());
        assert!(validate(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_zone_number() {
        assert_eq!(zone_number(0.0), 31);
        assert_eq!(zone_number(5.999), 31);
        assert_eq!(zone_number(6.001), 32);
        assert_eq!(zone_number(-0.001), 30);
        assert_eq!(zone_number(-180.0), 1);
        assert_eq!(zone_number(-174.0), 2);
        assert_eq!(zone_number(179.999), 60);
        assert_eq!(zone_number(2.35), 31);
        assert_eq!(zone_number(-61.07), 20);
    }

    #[test]
    fn test_zone_monotonic() {
        let mut previous = zone_number(-180.0);
        let mut lon = -180.0;
        while lon < 180.0 {
            let zone = zone_number(lon);
            assert!(zone == previous || zone == previous + 1, "lon={}", lon);
            previous = zone;
            lon += 0.1;
        }
        assert_eq!(previous, ZONE_COUNT);
    }

    #[test]
    fn test_central_meridian() {
        assert_eq!(central_meridian(31), 3.0);
        assert_eq!(central_meridian(1), -177.0);
        assert_eq!(central_meridian(60), 177.0);
    }
}
