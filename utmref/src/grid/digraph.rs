//! Tables de lettres du digraphe MGRS (carrés de 100 km)
//!
//! Colonnes : 24 lettres (A..Z sans I ni O), trois jeux de huit selon `zone mod 3`.
//! Lignes : cycle de 20 lettres (A..V sans I ni O), `V` en position 0, décalé
//! de 5 pour les zones paires.

use crate::error::{ConversionError, Result};
use crate::types::SQUARE_SIZE;

/// Lettres de colonne
pub const COLUMN_LETTERS: [char; 24] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Lettres de ligne, position 0 = `V`
pub const ROW_LETTERS: [char; 20] = [
    'V', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T',
    'U',
];

/// Base de décodage des colonnes, indexée par `zone mod 3`
const COLUMN_BASES: [i64; 3] = [16, 0, 8];

/// Colonnes par zone
const COLUMNS_PER_SET: i64 = 8;

/// Jeu de colonnes de la zone (0, 1 ou 2)
fn column_set(zone: u8) -> i64 {
    i64::from((zone - 1) % 3)
}

/// Position de départ du cycle des lignes : 1 (zones impaires) ou 6 (zones paires)
pub fn row_start(zone: u8) -> i64 {
    1 + 5 * i64::from((zone - 1) % 2)
}

/// Numéro du carré de 100 km contenant une coordonnée
fn square(meters: f64) -> i64 {
    (meters / f64::from(SQUARE_SIZE)).floor() as i64
}

/// Lettre de colonne pour un easting
pub fn column_letter(zone: u8, easting: f64) -> char {
    let index = (COLUMNS_PER_SET * column_set(zone) + square(easting) - 1).rem_euclid(24);
    COLUMN_LETTERS[index as usize]
}

/// Lettre de ligne pour un northing
pub fn row_letter(zone: u8, northing: f64) -> char {
    let index = (row_start(zone) + square(northing)).rem_euclid(20);
    ROW_LETTERS[index as usize]
}

/// Numéro de colonne (1..=8) d'une lettre dans le jeu de la zone
pub fn column_index(zone: u8, letter: char) -> Result<i64> {
    let unknown = || ConversionError::UnknownGridLetter { letter, zone };
    let position = COLUMN_LETTERS
        .iter()
        .position(|&l| l == letter)
        .ok_or_else(unknown)? as i64
        + 1;
    let column = position - COLUMN_BASES[usize::from(zone % 3)];
    if (1..=COLUMNS_PER_SET).contains(&column) {
        Ok(column)
    } else {
        Err(unknown())
    }
}

/// Rang de ligne modulo 20 (carrés de 100 km depuis un multiple de 2 000 km)
pub fn row_position(zone: u8, letter: char) -> Result<i64> {
    let index = ROW_LETTERS
        .iter()
        .position(|&l| l == letter)
        .ok_or(ConversionError::UnknownGridLetter { letter, zone })? as i64;
    Ok((index - row_start(zone)).rem_euclid(20))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabets_skip_i_and_o() {
        assert!(!COLUMN_LETTERS.contains(&'I') && !COLUMN_LETTERS.contains(&'O'));
        assert!(!ROW_LETTERS.contains(&'I') && !ROW_LETTERS.contains(&'O'));
        assert!(!ROW_LETTERS.contains(&'W'));
    }

    #[test]
    fn test_column_sets() {
        // Jeu 1 : A..H, jeu 2 : J..R, jeu 3 : S..Z
        assert_eq!(column_letter(31, 166021.0), 'A');
        assert_eq!(column_letter(31, 850000.0), 'H');
        assert_eq!(column_letter(32, 166021.0), 'J');
        assert_eq!(column_letter(32, 850000.0), 'R');
        assert_eq!(column_letter(33, 166021.0), 'S');
        assert_eq!(column_letter(33, 850000.0), 'Z');
        assert_eq!(column_letter(1, 500000.0), 'E');
    }

    #[test]
    fn test_row_cycle() {
        assert_eq!(row_letter(31, 0.0), 'A');
        assert_eq!(row_letter(32, 0.0), 'F');
        assert_eq!(row_letter(31, 1_900_000.0), 'V');
        assert_eq!(row_letter(31, 2_000_000.0), 'A');
        assert_eq!(row_letter(32, 1_400_000.0), 'V');
        assert_eq!(row_letter(31, -100_000.0), 'V');
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index(31, 'A').unwrap(), 1);
        assert_eq!(column_index(32, 'R').unwrap(), 8);
        assert_eq!(column_index(33, 'S').unwrap(), 1);
        assert!(column_index(31, 'J').is_err());
        assert!(column_index(33, 'A').is_err());
        assert!(column_index(31, 'I').is_err());
    }

    #[test]
    fn test_row_position_inverts_row_letter() {
        for zone in [1_u8, 2, 31, 32, 60] {
            for k in 0..40_i64 {
                let letter = row_letter(zone, k as f64 * 100_000.0 + 50.0);
                assert_eq!(row_position(zone, letter).unwrap(), k % 20, "zone={} k={}", zone, k);
            }
        }
        assert!(row_position(31, 'W').is_err());
    }

    #[test]
    fn test_column_index_inverts_column_letter() {
        for zone in 1..=60_u8 {
            for col in 1..=8_i64 {
                let letter = column_letter(zone, col as f64 * 100_000.0 + 1.0);
                assert_eq!(column_index(zone, letter).unwrap(), col, "zone={}", zone);
            }
        }
    }
}
