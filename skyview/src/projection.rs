//! Celestial sphere to character grid projection.
//!
//! Each visible star is expressed relative to the viewing direction as a
//! radial distance and a bearing in the tangent plane at the screen center.
//!
//! # Geometry
//!
//! With unit vectors `s` (star) and `c` (view center):
//!
//! ```text
//! cos_sep  = s · c
//! p        = normalize(s - cos_sep · c)        bearing direction
//! cos_g    = dθ · p                            component toward +Dec ("up")
//! sin_g    = dφ · p                            component toward +RA ("left")
//! tan_half = sqrt((1 - cos_sep) / (1 + cos_sep)) · R / fov
//! x        = W/2 - A · tan_half · sin_g
//! y        = H/2 - tan_half · cos_g
//! ```
//!
//! where `R = H/2` is the disk radius in rows and `A = W/H` stretches columns
//! so the disk stays round on tall console cells. Stars with
//! `tan_half > R` fall outside the visible disk and are dropped.

use log::debug;
use nalgebra::Vector3;
use starfield::catalogs::{BrightStarEntry, StarCatalog};
use starfield::Equatorial;

use crate::config::{GridSize, SkyConfig};
use crate::frame::{Dot, Frame};
use crate::glyph::{Glyph, StarColor};
use crate::viewpoint::Viewpoint;
use crate::visibility::VisibilityFilter;

// Perpendicular components shorter than this have no meaningful bearing;
// such stars sit on the view center.
const BEARING_EPSILON: f64 = 1e-9;

/// Position of a star relative to the view center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentOffset {
    /// tan of half the angular separation, unscaled
    pub tan_half: f64,
    /// Bearing component along increasing declination
    pub cos_g: f64,
    /// Bearing component along increasing right ascension
    pub sin_g: f64,
}

/// Orthonormal basis of the tangent plane at a view center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    center: Vector3<f64>,
    d_theta: Vector3<f64>,
    d_phi: Vector3<f64>,
}

impl TangentFrame {
    pub fn at(center: &Equatorial) -> Self {
        let (sin_ra, cos_ra) = center.ra.sin_cos();
        let (sin_dec, cos_dec) = center.dec.sin_cos();
        Self {
            center: center.to_unit_vector(),
            d_theta: Vector3::new(-sin_dec * cos_ra, -sin_dec * sin_ra, cos_dec),
            d_phi: Vector3::new(-sin_ra, cos_ra, 0.0),
        }
    }

    /// Offset of the unit vector `star` from the center.
    ///
    /// Returns None for the antipode of the center, where the radial
    /// distance is unbounded.
    pub fn offset(&self, star: &Vector3<f64>) -> Option<TangentOffset> {
        let cos_sep = star.dot(&self.center);
        let denominator = 1.0 + cos_sep;
        if denominator <= 0.0 {
            return None;
        }
        // Rounding can push cos_sep slightly past 1
        let tan_half = ((1.0 - cos_sep) / denominator).max(0.0).sqrt();

        let perpendicular = star - self.center * cos_sep;
        let (cos_g, sin_g) = match perpendicular.try_normalize(BEARING_EPSILON) {
            Some(bearing) => (self.d_theta.dot(&bearing), self.d_phi.dot(&bearing)),
            None => (0.0, 0.0),
        };

        Some(TangentOffset {
            tan_half,
            cos_g,
            sin_g,
        })
    }
}

/// True when a scaled radius lies on or inside the visible disk
pub fn within_visible_disk(scaled_radius: f64, disk_radius: f64) -> bool {
    scaled_radius <= disk_radius
}

/// Maps sky positions to grid cells for one viewpoint
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    frame: TangentFrame,
    grid: GridSize,
    scale: f64,
}

impl Projector {
    pub fn new(viewpoint: &Viewpoint, grid: GridSize) -> Self {
        Self {
            frame: TangentFrame::at(&viewpoint.center),
            grid,
            scale: grid.disk_radius() / viewpoint.field_of_view,
        }
    }

    /// Radial distance from the screen center in rows, or None at the antipode
    pub fn scaled_radius(&self, position: &Equatorial) -> Option<f64> {
        self.frame
            .offset(&position.to_unit_vector())
            .map(|offset| offset.tan_half * self.scale)
    }

    /// Cell (x, y) for a sky position, or None when it is off screen
    pub fn screen_position(&self, position: &Equatorial) -> Option<(usize, usize)> {
        let offset = self.frame.offset(&position.to_unit_vector())?;
        let radius = offset.tan_half * self.scale;
        if !within_visible_disk(radius, self.grid.disk_radius()) {
            return None;
        }

        let (center_x, center_y) = self.grid.center();
        let x = (center_x - self.grid.aspect_ratio() * radius * offset.sin_g).trunc() as i64;
        let y = (center_y - radius * offset.cos_g).trunc() as i64;

        // The disk rim can truncate to x == W or y == H
        if self.grid.contains(x, y) {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Place a catalog star, classifying it against the render cutoff
    pub fn place(&self, star: &BrightStarEntry, cutoff: f64) -> Option<Dot> {
        let (x, y) = self.screen_position(&star.position())?;
        Some(Dot {
            x,
            y,
            glyph: Glyph::classify(star.magnitude, cutoff),
            color: StarColor::for_class(star.spectral_class),
            magnitude: star.magnitude,
        })
    }
}

/// Project every visible catalog star for `viewpoint` into a frame.
///
/// Pure function of its inputs: the same viewpoint and catalog always
/// produce the same frame.
pub fn project<C>(viewpoint: &Viewpoint, catalog: &C, config: &SkyConfig) -> Frame
where
    C: StarCatalog<Star = BrightStarEntry>,
{
    let filter = VisibilityFilter::new(&config.magnitude_limit, viewpoint.field_of_view);
    let projector = Projector::new(viewpoint, config.grid);

    let mut visible = 0usize;
    let mut on_screen = 0usize;
    let frame: Frame = filter
        .visible_stars(catalog)
        .inspect(|_| visible += 1)
        .filter_map(|star| projector.place(star, filter.cutoff()))
        .inspect(|_| on_screen += 1)
        .collect();

    debug!(
        "Projected {} of {} stars (cutoff {:.2}): {} on screen, {} cells after overlap",
        visible,
        catalog.len(),
        filter.cutoff(),
        on_screen,
        frame.len()
    );
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use starfield::catalogs::{BrightStarCatalog, SpectralClass};

    fn view(ra_deg: f64, dec_deg: f64, field_of_view: f64) -> Viewpoint {
        Viewpoint::new(Equatorial::from_degrees(ra_deg, dec_deg), field_of_view)
    }

    #[test]
    fn test_tangent_basis_is_orthonormal() {
        let frame = TangentFrame::at(&Equatorial::from_degrees(37.0, -21.0));
        assert_relative_eq!(frame.d_theta.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.d_phi.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.d_theta.dot(&frame.d_phi), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.d_theta.dot(&frame.center), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.d_phi.dot(&frame.center), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_half_angle() {
        let frame = TangentFrame::at(&Equatorial::new(0.0, 0.0));
        let star = Equatorial::from_degrees(0.0, 40.0).to_unit_vector();
        let offset = frame.offset(&star).unwrap();

        assert_relative_eq!(offset.tan_half, 20f64.to_radians().tan(), epsilon = 1e-12);
        assert_relative_eq!(offset.cos_g, 1.0, epsilon = 1e-12);
        assert_relative_eq!(offset.sin_g, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_antipode_rejected() {
        let frame = TangentFrame::at(&Equatorial::new(0.0, 0.0));
        let antipode = Vector3::new(-1.0, 0.0, 0.0);
        assert!(frame.offset(&antipode).is_none());
    }

    #[rstest]
    #[case(0.1)]
    #[case(0.5)]
    #[case(1.0)]
    fn test_center_star_hits_screen_center(#[case] field_of_view: f64) {
        let viewpoint = view(123.0, -45.0, field_of_view);
        let projector = Projector::new(&viewpoint, GridSize::default());
        assert_eq!(projector.screen_position(&viewpoint.center), Some((50, 25)));
    }

    #[test]
    fn test_directions_on_screen() {
        let projector = Projector::new(&view(0.0, 0.0, 1.0), GridSize::default());

        // North is up, increasing RA is to the left
        let (_, north_y) = projector
            .screen_position(&Equatorial::from_degrees(0.0, 10.0))
            .unwrap();
        assert!(north_y < 25);

        let (east_x, _) = projector
            .screen_position(&Equatorial::from_degrees(10.0, 0.0))
            .unwrap();
        assert!(east_x < 50);
    }

    #[test]
    fn test_disk_boundary_is_closed() {
        assert!(within_visible_disk(25.0, 25.0));
        assert!(!within_visible_disk(25.0 + 1e-9, 25.0));
    }

    #[test]
    fn test_quarter_sphere_lands_on_rim() {
        // At fov 1.0 the rim of the disk is 90 degrees from the center
        let projector = Projector::new(&view(0.0, 0.0, 1.0), GridSize::default());
        let rim = Equatorial::from_degrees(0.0, 90.0);

        assert!(projector.scaled_radius(&rim).unwrap() <= 25.0);
        assert_eq!(projector.screen_position(&rim), Some((50, 0)));

        let beyond = Equatorial::from_degrees(180.0, 89.0);
        assert!(projector.scaled_radius(&beyond).unwrap() > 25.0);
        assert_eq!(projector.screen_position(&beyond), None);
    }

    #[test]
    fn test_positions_stay_on_grid() {
        let grid = GridSize::default();
        for &(ra, dec, fov) in &[(0.0, 0.0, 1.0), (200.0, 60.0, 0.3), (90.0, -90.0, 0.8)] {
            let projector = Projector::new(&view(ra, dec, fov), grid);
            for ra_step in 0..72 {
                for dec_step in -17..=17 {
                    let position =
                        Equatorial::from_degrees(ra_step as f64 * 5.0, dec_step as f64 * 5.0);
                    if let Some((x, y)) = projector.screen_position(&position) {
                        assert!(x < grid.width && y < grid.height);
                        assert!(projector.scaled_radius(&position).unwrap() <= 25.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_project_drops_faint_stars() {
        let catalog = BrightStarCatalog::from_entries(vec![
            BrightStarEntry::new(0.0, 0.0, 3.0, SpectralClass::G),
            BrightStarEntry::new(0.0, 1.0, 4.5, SpectralClass::K),
        ]);
        let frame = project(&view(0.0, 0.0, 1.0), &catalog, &SkyConfig::default());

        assert_eq!(frame.len(), 1);
        assert!(frame.iter().all(|dot| dot.magnitude <= 3.87));
    }

    #[test]
    fn test_project_is_idempotent() {
        let catalog = BrightStarCatalog::from_entries(
            (0..200)
                .map(|i| {
                    BrightStarEntry::new(
                        (i as f64 * 0.37) % 24.0,
                        (i as f64 * 7.3) % 180.0 - 90.0,
                        (i % 6) as f64,
                        SpectralClass::ALL[i % 7],
                    )
                })
                .collect(),
        );
        let viewpoint = view(30.0, 20.0, 0.7);
        let config = SkyConfig::default();

        assert_eq!(
            project(&viewpoint, &catalog, &config),
            project(&viewpoint, &catalog, &config)
        );
    }
}
