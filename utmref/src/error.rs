//! Types d'erreurs pour le crate utmref

use thiserror::Error;

/// Catégorie d'une erreur de conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Latitude/longitude hors du domaine valide
    Range,
    /// Texte UTM/MGRS mal formé
    Format,
    /// Lettre absente des tables de bandes ou de carrés
    Domain,
}

/// Erreurs pouvant survenir lors d'une conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Coordonnées géographiques hors domaine
    #[error(
        "Coordinates out of range (lat={latitude}, lon={longitude}): \
         legal ranges are latitude [-90,90], longitude [-180,180)"
    )]
    OutOfRange { latitude: f64, longitude: f64 },

    /// Texte UTM ou MGRS mal formé
    #[error("Invalid {notation} '{input}': {reason}")]
    Format {
        notation: &'static str,
        input: String,
        reason: String,
    },

    /// Bande de latitude inconnue
    #[error("Unknown latitude band '{0}'")]
    UnknownBand(char),

    /// Lettre de carré 100 km inconnue ou hors du jeu de la zone
    #[error("Grid square letter '{letter}' is not valid for zone {zone}")]
    UnknownGridLetter { letter: char, zone: u8 },
}

impl ConversionError {
    /// Crée une erreur de format UTM
    pub fn utm_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            notation: "UTM",
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Crée une erreur de format MGRS
    pub fn mgrs_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            notation: "MGRS",
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Catégorie de l'erreur
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } => ErrorKind::Range,
            Self::Format { .. } => ErrorKind::Format,
            Self::UnknownBand(_) | Self::UnknownGridLetter { .. } => ErrorKind::Domain,
        }
    }
}

/// Alias de résultat du crate
pub type Result<T> = std::result::Result<T, ConversionError>;
