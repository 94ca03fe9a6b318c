use serde::{Deserialize, Serialize};
use starfield::Equatorial;

/// Immutable view snapshot handed to a single render.
///
/// `field_of_view` is the dimensionless tangent half-angle parameter; the
/// full viewing angle is `2·atan(field_of_view)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    /// Direction at the center of the screen
    pub center: Equatorial,
    /// Tangent half-angle field of view parameter
    pub field_of_view: f64,
}

impl Viewpoint {
    pub fn new(center: Equatorial, field_of_view: f64) -> Self {
        Self {
            center,
            field_of_view,
        }
    }

    /// Full viewing angle in degrees
    pub fn viewing_angle_degrees(&self) -> f64 {
        2.0 * self.field_of_view.atan().to_degrees()
    }
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self::new(Equatorial::new(0.0, 0.0), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_viewing_angle() {
        let view = Viewpoint::default();
        assert_relative_eq!(view.viewing_angle_degrees(), 90.0, epsilon = 1e-12);
    }
}
