//! Equatorial coordinates on the celestial sphere.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A direction on the celestial sphere in equatorial coordinates.
///
/// Both components are stored in radians. Right ascension is not
/// normalized: every consumer goes through sin/cos, so values outside
/// [0, 2π) describe the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in radians
    pub ra: f64,
    /// Declination in radians
    pub dec: f64,
}

impl Equatorial {
    /// Create coordinates from right ascension and declination in radians
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Create coordinates from right ascension and declination in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg.to_radians(), dec_deg.to_radians())
    }

    /// Create coordinates from right ascension in hours and declination in degrees
    pub fn from_hours_degrees(ra_hours: f64, dec_deg: f64) -> Self {
        Self::from_degrees(ra_hours * 15.0, dec_deg)
    }

    /// Right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        self.ra.to_degrees()
    }

    /// Declination in degrees
    pub fn dec_degrees(&self) -> f64 {
        self.dec.to_degrees()
    }

    /// Right ascension in hours, wrapped into [0, 24)
    pub fn ra_hours(&self) -> f64 {
        (self.ra_degrees() / 15.0).rem_euclid(24.0)
    }

    /// Unit vector pointing at this direction.
    ///
    /// ```text
    /// v = (cos(dec)·cos(ra), cos(dec)·sin(ra), sin(dec))
    /// ```
    pub fn to_unit_vector(&self) -> Vector3<f64> {
        let (sin_ra, cos_ra) = self.ra.sin_cos();
        let (sin_dec, cos_dec) = self.dec.sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
    }
}

impl fmt::Display for Equatorial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RA {:.4}h, Dec {:+.4}°",
            self.ra_hours(),
            self.dec_degrees()
        )
    }
}
