//! Encodage et décodage des références MGRS

use tracing::debug;

use super::digraph::{column_index, column_letter, row_letter, row_position};
use crate::bands::LatitudeBand;
use crate::ellipsoid::{wgs84, FALSE_NORTHING};
use crate::error::{ConversionError, Result};
use crate::projection::degrees_to_radians;
use crate::types::{check_zone, zone_reason, MgrsCoordinate, UtmCoordinate, SQUARE_SIZE};

/// Longueur de la forme canonique
pub const MGRS_LEN: usize = 15;

/// Nombre de lignes d'un cycle (2 000 km)
const ROW_CYCLE: i64 = 20;

/// Encode une coordonnée UTM en référence MGRS
pub fn encode(utm: &UtmCoordinate) -> MgrsCoordinate {
    let zone = utm.zone();
    let column = column_letter(zone, utm.easting());
    let row = row_letter(zone, utm.northing());

    MgrsCoordinate::from_parts(
        zone,
        utm.band(),
        column,
        row,
        square_offset(utm.easting()),
        square_offset(utm.northing()),
    )
}

/// Reconstitue la coordonnée UTM complète d'une référence MGRS
///
/// Le digraphe ne donne la ligne qu'à 2 000 km près. Le cycle est ancré sur la
/// borne inférieure de la bande de latitude : on retient la première ligne
/// portant la bonne lettre à partir du carré situé juste sous cette borne, ce
/// qui couvre toute la bande, renflement de bord de zone compris.
///
/// # Errors
///
/// [`ConversionError::UnknownGridLetter`] si une lettre n'appartient pas au jeu de la zone,
/// [`ConversionError::Format`] si le northing reconstitué sort de la plage UTM.
pub fn decode(mgrs: &MgrsCoordinate) -> Result<UtmCoordinate> {
    let zone = mgrs.zone();
    let band = mgrs.band();
    let square_size = i64::from(SQUARE_SIZE);

    let column = column_index(zone, mgrs.column())?;
    let easting = column * square_size + i64::from(mgrs.easting_offset());

    let anchor = anchor_row(band);
    let row = row_position(zone, mgrs.row())?;
    let row = anchor + (row - anchor).rem_euclid(ROW_CYCLE);
    let northing = row * square_size + i64::from(mgrs.northing_offset());

    debug!(mgrs = %mgrs, anchor, row, easting, northing, "décodage MGRS");

    UtmCoordinate::new(zone, band.letter(), easting as f64, northing as f64)
}

/// Première ligne de 100 km candidate pour une bande
fn anchor_row(band: LatitudeBand) -> i64 {
    let c = wgs84();
    let mut northing = c.k0 * c.meridian_arc(degrees_to_radians(band.lower_bound()));
    if band.is_southern() {
        northing += FALSE_NORTHING;
    }
    (northing / f64::from(SQUARE_SIZE)).floor() as i64 - 1
}

/// Décalage tronqué au mètre dans le carré de 100 km
fn square_offset(meters: f64) -> u32 {
    (meters.trunc() as i64).rem_euclid(i64::from(SQUARE_SIZE)) as u32
}

/// Parse la forme canonique `ZZBCRddddddddddd` (15 caractères)
///
/// Les lettres sont acceptées en minuscules.
pub fn parse(input: &str) -> Result<MgrsCoordinate> {
    let format_err = |reason: &str| ConversionError::mgrs_format(input, reason);

    if !input.is_ascii() || input.len() != MGRS_LEN {
        return Err(format_err("expected 15 ASCII characters"));
    }
    let bytes = input.as_bytes();

    let zone = parse_digits(&input[0..2]).ok_or_else(|| format_err("zone must be 2 digits"))?;
    let zone = check_zone(i64::from(zone), || format_err(zone_reason()))?;

    let letter = |i: usize, what: &str| {
        let c = char::from(bytes[i]);
        if c.is_ascii_alphabetic() {
            Ok(c.to_ascii_uppercase())
        } else {
            Err(format_err(&format!("{} must be a letter", what)))
        }
    };
    let band = letter(2, "band")?;
    let column = letter(3, "column")?;
    let row = letter(4, "row")?;

    let easting = parse_digits(&input[5..10]).ok_or_else(|| format_err("easting must be 5 digits"))?;
    let northing = parse_digits(&input[10..15]).ok_or_else(|| format_err("northing must be 5 digits"))?;

    MgrsCoordinate::new(zone, band, column, row, easting, northing)
}

/// Champ purement numérique (pas de signe ni d'espace)
fn parse_digits(field: &str) -> Option<u32> {
    if field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::projection::project;

    #[test]
    fn test_encode_origin() {
        let mgrs = encode(&project(0.0, 0.0).unwrap());
        assert_eq!(mgrs.to_string(), "31NAA6602100000");
    }

    #[test]
    fn test_encode_paris() {
        let mgrs = encode(&project(48.853, 2.3498).unwrap());
        assert_eq!(mgrs.to_string(), "31UDQ5230311318");
    }

    #[test]
    fn test_decode_recovers_full_coordinates() {
        let utm = project(48.853, 2.3498).unwrap();
        let back = decode(&encode(&utm)).unwrap();
        assert_eq!(back.zone(), 31);
        assert_eq!(back.band(), utm.band());
        assert_eq!(back.easting(), utm.easting().trunc());
        assert_eq!(back.northing(), utm.northing().trunc());
    }

    #[test]
    fn test_decode_even_zone_high_row() {
        // Zone paire, bande P : la ligne dépasse le premier cycle de 2 000 km
        let utm = project(14.6, -61.07).unwrap();
        assert_eq!(utm.zone(), 20);
        let back = decode(&encode(&utm)).unwrap();
        assert_eq!(back.northing(), utm.northing().trunc());
    }

    #[test]
    fn test_decode_southern() {
        let utm = project(-33.8688, 151.2093).unwrap();
        let back = decode(&encode(&utm)).unwrap();
        assert_eq!(back.northing(), utm.northing().trunc());
        assert_eq!(back.easting(), utm.easting().trunc());
    }

    #[test]
    fn test_decode_band_x_near_lower_bound() {
        // Juste au-dessus de 72°N, le northing est sous 8 000 km
        let utm = project(72.0001, 3.0).unwrap();
        assert!(utm.northing() < 8_000_000.0);
        let back = decode(&encode(&utm)).unwrap();
        assert_eq!(back.northing(), utm.northing().trunc());
    }

    #[test]
    fn test_parse() {
        let mgrs = parse("31NAA6602100000").unwrap();
        assert_eq!(mgrs.zone(), 31);
        assert_eq!(mgrs.band().letter(), 'N');
        assert_eq!(mgrs.column(), 'A');
        assert_eq!(mgrs.row(), 'A');
        assert_eq!(mgrs.easting_offset(), 66021);
        assert_eq!(mgrs.northing_offset(), 0);

        let lower = parse("31naa6602100000").unwrap();
        assert_eq!(lower, mgrs);
    }

    #[test]
    fn test_parse_errors() {
        let kind = |s: &str| parse(s).unwrap_err().kind();
        assert_eq!(kind("bad"), ErrorKind::Format);
        assert_eq!(kind(""), ErrorKind::Format);
        assert_eq!(kind("31NAA66021000000"), ErrorKind::Format);
        assert_eq!(kind("3XNAA6602100000"), ErrorKind::Format);
        assert_eq!(kind("00NAA6602100000"), ErrorKind::Format);
        assert_eq!(kind("61NAA6602100000"), ErrorKind::Format);
        assert_eq!(kind("311AA6602100000"), ErrorKind::Format);
        assert_eq!(kind("31NAA66O2100000"), ErrorKind::Format);
        assert_eq!(kind("31NAA-660210000"), ErrorKind::Format);
        assert_eq!(kind("31NAA6602100 00"), ErrorKind::Format);
        assert_eq!(kind("31NAA6602100é0"), ErrorKind::Format);
        assert_eq!(kind("31IAA6602100000"), ErrorKind::Domain);
        assert_eq!(kind("31NJA6602100000"), ErrorKind::Domain);
        assert_eq!(kind("31NAW6602100000"), ErrorKind::Domain);
    }
}
