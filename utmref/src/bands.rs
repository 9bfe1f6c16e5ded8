//! Table des bandes de latitude UTM/MGRS
//!
//! 22 bandes ordonnées du sud au nord : les bandes de bord `A` (sous -80°) et
//! `Z` (au-dessus de 84°), puis `C` à `X` (sans `I` ni `O`) larges de 8°,
//! sauf `X` qui couvre 72°..84°.

use std::fmt;

use crate::error::{ConversionError, Result};

/// Lettres et bornes inférieures (degrés), triées par latitude croissante
const BANDS: [(char, i32); 22] = [
    ('A', -90),
    ('C', -80),
    ('D', -72),
    ('E', -64),
    ('F', -56),
    ('G', -48),
    ('H', -40),
    ('J', -32),
    ('K', -24),
    ('L', -16),
    ('M', -8),
    ('N', 0),
    ('P', 8),
    ('Q', 16),
    ('R', 24),
    ('S', 32),
    ('T', 40),
    ('U', 48),
    ('V', 56),
    ('W', 64),
    ('X', 72),
    ('Z', 84),
];

/// Lettres de l'hémisphère sud
const SOUTHERN_BANDS: &[char] = &['A', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M'];

/// Bande de latitude (entrée de la table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatitudeBand {
    index: usize,
}

impl LatitudeBand {
    /// Bande contenant la latitude (degrés)
    ///
    /// Parcours ordonné : la bande retenue est celle dont la borne inférieure
    /// est la plus grande valeur `<= lat`. Les latitudes sous -80° tombent dans `A`.
    pub fn for_latitude(lat: f64) -> Self {
        let mut index = 0;
        for (i, &(_, lower)) in BANDS.iter().enumerate() {
            if f64::from(lower) <= lat {
                index = i;
            } else {
                break;
            }
        }
        Self { index }
    }

    /// Retrouve une bande depuis sa lettre
    pub fn from_letter(letter: char) -> Result<Self> {
        BANDS
            .iter()
            .position(|&(l, _)| l == letter)
            .map(|index| Self { index })
            .ok_or(ConversionError::UnknownBand(letter))
    }

    /// Lettre de la bande
    pub fn letter(self) -> char {
        BANDS[self.index].0
    }

    /// Borne inférieure en degrés
    pub fn lower_bound(self) -> f64 {
        f64::from(BANDS[self.index].1)
    }

    /// Borne supérieure en degrés (90 pour la bande `Z`)
    pub fn upper_bound(self) -> f64 {
        BANDS
            .get(self.index + 1)
            .map_or(90.0, |&(_, lower)| f64::from(lower))
    }

    /// Vrai si la bande appartient à l'hémisphère sud
    pub fn is_southern(self) -> bool {
        SOUTHERN_BANDS.contains(&self.letter())
    }
}

impl fmt::Display for LatitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Lettre de bande pour une latitude (degrés)
pub fn band_for_latitude(lat: f64) -> char {
    LatitudeBand::for_latitude(lat).letter()
}

/// Borne inférieure (degrés) de la bande désignée par `letter`
pub fn degrees_for_band(letter: char) -> Result<f64> {
    LatitudeBand::from_letter(letter).map(LatitudeBand::lower_bound)
}

/// Vrai si la lettre désigne une bande de l'hémisphère sud
pub fn is_southern_band(letter: char) -> bool {
    SOUTHERN_BANDS.contains(&letter)
}
