//! Ellipsoïde de référence et constantes dérivées de la projection UTM
//!
//! Toutes les séries (arc méridien, latitude du pied) sont calculées une seule
//! fois à partir des demi-axes; changer d'ellipsoïde ne demande que de
//! reconstruire un [`ProjectionConstants`].

use std::sync::OnceLock;

/// Facteur d'échelle sur le méridien central
pub const K0: f64 = 0.9996;

/// False easting (m)
pub const FALSE_EASTING: f64 = 500_000.0;

/// False northing de l'hémisphère sud (m)
pub const FALSE_NORTHING: f64 = 10_000_000.0;

/// Ellipsoïde défini par ses deux demi-axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,
    /// Demi-petit axe (rayon polaire) en mètres
    pub b: f64,
}

impl Ellipsoid {
    /// Ellipsoïde WGS84 (rayon polaire arrondi au millimètre)
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        b: 6356752.314,
    };

    /// Aplatissement
    pub fn flattening(&self) -> f64 {
        (self.a - self.b) / self.a
    }

    /// Première excentricité
    pub fn eccentricity(&self) -> f64 {
        (1.0 - (self.b / self.a).powi(2)).sqrt()
    }

    /// Deuxième excentricité au carré (e'²)
    pub fn second_eccentricity_sq(&self) -> f64 {
        let e2 = self.eccentricity().powi(2);
        e2 / (1.0 - e2)
    }

    /// Troisième aplatissement n = (a - b) / (a + b)
    pub fn third_flattening(&self) -> f64 {
        (self.a - self.b) / (self.a + self.b)
    }
}

/// Constantes de la projection transverse de Mercator pour un ellipsoïde
#[derive(Debug, Clone, Copy)]
pub struct ProjectionConstants {
    /// Demi-grand axe
    pub a: f64,
    /// Première excentricité
    pub e: f64,
    /// Deuxième excentricité au carré
    pub e1sq: f64,
    /// Facteur d'échelle
    pub k0: f64,
    /// Coefficients de l'arc méridien A0..E0
    pub arc: [f64; 5],
    /// Coefficients de la latitude du pied ca..cd
    pub footpoint: [f64; 4],
    /// Rayon rectifiant: a·(1 - e²/4 - 3e⁴/64 - 5e⁶/256)
    pub rectifying_radius: f64,
}

impl ProjectionConstants {
    /// Dérive toutes les constantes depuis l'ellipsoïde
    pub fn new(ellipsoid: Ellipsoid, k0: f64) -> Self {
        let a = ellipsoid.a;
        let e = ellipsoid.eccentricity();
        let e2 = e * e;

        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;

        let a0 = a * (1.0 - n + 5.0 * (n2 - n3) / 4.0 + 81.0 * (n4 - n5) / 64.0);
        let b0 = 3.0 * a * n / 2.0 * (1.0 - n + 7.0 * (n2 - n3) / 8.0 + 55.0 * (n4 - n5) / 64.0);
        let c0 = 15.0 * a * n2 / 16.0 * (1.0 - n + 3.0 * (n2 - n3) / 4.0);
        let d0 = 35.0 * a * n3 / 48.0 * (1.0 - n + 11.0 * (n2 - n3) / 16.0);
        let e0 = 315.0 * a * n4 / 51.0 * (1.0 - n);

        // ei vaut n pour un ellipsoïde de révolution, mais on garde la forme en e
        let root = (1.0 - e2).sqrt();
        let ei = (1.0 - root) / (1.0 + root);
        let ca = 3.0 * ei / 2.0 - 27.0 * ei.powi(3) / 32.0;
        let cb = 21.0 * ei.powi(2) / 16.0 - 55.0 * ei.powi(4) / 32.0;
        let cc = 151.0 * ei.powi(3) / 96.0;
        let cd = 1097.0 * ei.powi(4) / 512.0;

        Self {
            a,
            e,
            e1sq: ellipsoid.second_eccentricity_sq(),
            k0,
            arc: [a0, b0, c0, d0, e0],
            footpoint: [ca, cb, cc, cd],
            rectifying_radius: a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0),
        }
    }

    /// Longueur de l'arc méridien depuis l'équateur (latitude en radians)
    pub fn meridian_arc(&self, phi: f64) -> f64 {
        let [a0, b0, c0, d0, e0] = self.arc;
        a0 * phi - b0 * (2.0 * phi).sin() + c0 * (4.0 * phi).sin() - d0 * (6.0 * phi).sin()
            + e0 * (8.0 * phi).sin()
    }

    /// Latitude du pied (radians) pour une longueur d'arc méridien donnée
    pub fn footpoint_latitude(&self, arc: f64) -> f64 {
        let [ca, cb, cc, cd] = self.footpoint;
        let mu = arc / self.rectifying_radius;
        mu + ca * (2.0 * mu).sin() + cb * (4.0 * mu).sin() + cc * (6.0 * mu).sin() + cd * (8.0 * mu).sin()
    }

    /// Grande normale (rayon de courbure dans le premier vertical)
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        self.a / (1.0 - (self.e * phi.sin()).powi(2)).sqrt()
    }

    /// Rayon de courbure méridien
    pub fn meridional_radius(&self, phi: f64) -> f64 {
        self.a * (1.0 - self.e * self.e) / (1.0 - (self.e * phi.sin()).powi(2)).powf(1.5)
    }
}

/// Constantes WGS84 partagées, calculées au premier appel
pub fn wgs84() -> &'static ProjectionConstants {
    static CONSTANTS: OnceLock<ProjectionConstants> = OnceLock::new();
    CONSTANTS.get_or_init(|| ProjectionConstants::new(Ellipsoid::WGS84, K0))
}
