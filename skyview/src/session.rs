//! Mutable view state owned by the console front end.
//!
//! The session is the only place the viewpoint changes. Every render takes
//! an immutable [`Viewpoint`] snapshot via [`Session::snapshot`].

use std::f64::consts::FRAC_PI_2;

use log::debug;
use starfield::Equatorial;
use thiserror::Error;

use crate::config::{SkyConfig, ZoomLimits};
use crate::viewpoint::Viewpoint;

/// Rejected manual input; the view is left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("{field} must be in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: i64,
    },
}

fn parse_whole(text: &str) -> Result<i64, InputError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| InputError::NotANumber(text.trim().to_string()))
}

/// Interactive view state plus the rules for changing it
#[derive(Debug, Clone)]
pub struct Session {
    center: Equatorial,
    field_of_view: f64,
    zoom: ZoomLimits,
    turn_step: f64,
}

impl Session {
    /// Start facing RA 0h, Dec 0° at the widest field of view
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            center: Equatorial::new(0.0, 0.0),
            field_of_view: config.zoom.max_field_of_view,
            zoom: config.zoom,
            turn_step: config.turn_step,
        }
    }

    /// Replace the whole view, clamping declination to the poles
    pub fn with_viewpoint(mut self, viewpoint: Viewpoint) -> Self {
        self.center = Equatorial::new(
            viewpoint.center.ra,
            viewpoint.center.dec.clamp(-FRAC_PI_2, FRAC_PI_2),
        );
        self.field_of_view = viewpoint.field_of_view;
        self
    }

    /// Immutable copy of the current view for one render
    pub fn snapshot(&self) -> Viewpoint {
        Viewpoint::new(self.center, self.field_of_view)
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// Narrow the view. Out-of-range values snap to the narrowest view.
    pub fn zoom_in(&mut self) -> f64 {
        let fov = self.field_of_view;
        self.field_of_view =
            if fov >= self.zoom.zoom_in_floor && fov <= self.zoom.max_field_of_view {
                fov * self.zoom.zoom_in_factor
            } else {
                self.zoom.min_field_of_view
            };
        debug!("Zoom in: field of view {} -> {}", fov, self.field_of_view);
        self.field_of_view
    }

    /// Widen the view. Out-of-range values snap to the widest view.
    pub fn zoom_out(&mut self) -> f64 {
        let fov = self.field_of_view;
        self.field_of_view =
            if fov >= self.zoom.min_field_of_view && fov <= self.zoom.zoom_out_ceiling {
                fov * self.zoom.zoom_out_factor
            } else {
                self.zoom.max_field_of_view
            };
        debug!("Zoom out: field of view {} -> {}", fov, self.field_of_view);
        self.field_of_view
    }

    fn turn_amount(&self) -> f64 {
        self.turn_step * self.field_of_view
    }

    pub fn turn_up(&mut self) {
        self.center.dec = (self.center.dec + self.turn_amount()).min(FRAC_PI_2);
    }

    pub fn turn_down(&mut self) {
        self.center.dec = (self.center.dec - self.turn_amount()).max(-FRAC_PI_2);
    }

    /// Increase right ascension; not wrapped
    pub fn turn_left(&mut self) {
        self.center.ra += self.turn_amount();
    }

    /// Decrease right ascension; not wrapped
    pub fn turn_right(&mut self) {
        self.center.ra -= self.turn_amount();
    }

    /// Point at `hours`h `minutes`m of right ascension
    pub fn set_right_ascension(&mut self, hours: &str, minutes: &str) -> Result<(), InputError> {
        let hours = parse_whole(hours)?;
        let minutes = parse_whole(minutes)?;
        if !(0..24).contains(&hours) {
            return Err(InputError::OutOfRange {
                field: "hours",
                range: "[0, 24)",
                value: hours,
            });
        }
        if !(0..60).contains(&minutes) {
            return Err(InputError::OutOfRange {
                field: "minutes",
                range: "[0, 60)",
                value: minutes,
            });
        }
        let ra_hours = hours as f64 + minutes as f64 / 60.0;
        self.center.ra = Equatorial::from_hours_degrees(ra_hours, 0.0).ra;
        Ok(())
    }

    /// Point at a declination given in whole degrees
    pub fn set_declination(&mut self, degrees: &str) -> Result<(), InputError> {
        let degrees = parse_whole(degrees)?;
        if !(-90..=90).contains(&degrees) {
            return Err(InputError::OutOfRange {
                field: "declination",
                range: "[-90, 90]",
                value: degrees,
            });
        }
        self.center.dec = (degrees as f64).to_radians();
        Ok(())
    }

    /// Set the field of view from a viewing angle in whole degrees.
    ///
    /// Angles below 12° snap to the narrowest field of view. Angles from 12°
    /// to 90° are stored as radians, which can leave the field of view above
    /// the zoom range until the next zoom command snaps it back.
    pub fn set_viewing_angle(&mut self, degrees: &str) -> Result<(), InputError> {
        let degrees = parse_whole(degrees)?;
        self.field_of_view = match degrees {
            1..=11 => self.zoom.min_field_of_view,
            12..=90 => (degrees as f64).to_radians(),
            _ => {
                return Err(InputError::OutOfRange {
                    field: "viewing angle",
                    range: "(0, 90]",
                    value: degrees,
                })
            }
        };
        Ok(())
    }

    /// Right ascension rounded to whole (hours, minutes), wrapped into [0, 24h)
    pub fn right_ascension_hm(&self) -> (u32, u32) {
        let total_minutes = (self.center.ra_hours() * 60.0).round() as u32 % (24 * 60);
        (total_minutes / 60, total_minutes % 60)
    }

    /// Declination rounded to whole degrees
    pub fn declination_degrees(&self) -> i32 {
        self.center.dec_degrees().round() as i32
    }

    /// Full viewing angle rounded to whole degrees
    pub fn viewing_angle_degrees(&self) -> i32 {
        self.snapshot().viewing_angle_degrees().round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn session() -> Session {
        Session::new(&SkyConfig::default())
    }

    #[test]
    fn test_initial_view() {
        let view = session().snapshot();
        assert_eq!(view.center, Equatorial::new(0.0, 0.0));
        assert_eq!(view.field_of_view, 1.0);
    }

    #[test]
    fn test_zoom_roundtrip() {
        let mut session = session();
        let start = session.field_of_view();
        for _ in 0..5 {
            session.zoom_in();
        }
        assert!(session.field_of_view() < start);
        for _ in 0..5 {
            session.zoom_out();
        }
        assert_relative_eq!(session.field_of_view(), start, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_limits() {
        let mut session = session();
        for _ in 0..30 {
            session.zoom_in();
        }
        assert_relative_eq!(session.field_of_view(), 0.1);

        for _ in 0..30 {
            session.zoom_out();
        }
        assert_relative_eq!(session.field_of_view(), 1.0);
    }

    #[test]
    fn test_zoom_resets_out_of_range_values() {
        let origin = Equatorial::new(0.0, 0.0);
        let mut session = session().with_viewpoint(Viewpoint::new(origin, 1.5));
        session.zoom_in();
        assert_eq!(session.field_of_view(), 0.1);

        let mut session = session.with_viewpoint(Viewpoint::new(origin, 0.05));
        session.zoom_out();
        assert_eq!(session.field_of_view(), 1.0);
    }

    #[test]
    fn test_declination_clamped_at_poles() {
        let mut session = session();
        for _ in 0..10 {
            session.turn_up();
        }
        assert_eq!(session.snapshot().center.dec, FRAC_PI_2);
        for _ in 0..20 {
            session.turn_down();
        }
        assert_eq!(session.snapshot().center.dec, -FRAC_PI_2);
    }

    #[test]
    fn test_right_ascension_is_unbounded() {
        let mut session = session();
        session.turn_right();
        assert_relative_eq!(session.snapshot().center.ra, -0.5);
        for _ in 0..20 {
            session.turn_left();
        }
        assert_relative_eq!(session.snapshot().center.ra, 9.5, epsilon = 1e-12);
    }

    #[test]
    fn test_set_right_ascension() {
        let mut session = session();
        session.set_right_ascension("6", "30").unwrap();
        assert_relative_eq!(
            session.snapshot().center.ra,
            97.5f64.to_radians(),
            epsilon = 1e-12
        );
        assert_eq!(session.right_ascension_hm(), (6, 30));
    }

    #[rstest]
    #[case("24", "0")]
    #[case("-1", "0")]
    #[case("5", "60")]
    #[case("five", "0")]
    #[case("5", "")]
    fn test_set_right_ascension_rejects(#[case] hours: &str, #[case] minutes: &str) {
        let mut session = session();
        let before = session.snapshot();
        assert!(session.set_right_ascension(hours, minutes).is_err());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_set_declination() {
        let mut session = session();
        session.set_declination(" -45 ").unwrap();
        assert_eq!(session.declination_degrees(), -45);

        assert_eq!(
            session.set_declination("91"),
            Err(InputError::OutOfRange {
                field: "declination",
                range: "[-90, 90]",
                value: 91
            })
        );
        assert_eq!(
            session.set_declination("north"),
            Err(InputError::NotANumber("north".to_string()))
        );
        assert_eq!(session.declination_degrees(), -45);
    }

    #[rstest]
    #[case("5", 0.1)]
    #[case("11", 0.1)]
    #[case("12", 0.20943951023931953)]
    #[case("60", 1.0471975511965976)]
    #[case("90", 1.5707963267948966)]
    fn test_set_viewing_angle(#[case] input: &str, #[case] expected: f64) {
        let mut session = session();
        session.set_viewing_angle(input).unwrap();
        assert_relative_eq!(session.field_of_view(), expected, epsilon = 1e-9);
    }

    #[rstest]
    #[case("0")]
    #[case("91")]
    #[case("-10")]
    #[case("wide")]
    fn test_set_viewing_angle_rejects(#[case] input: &str) {
        let mut session = session();
        assert!(session.set_viewing_angle(input).is_err());
        assert_eq!(session.field_of_view(), 1.0);
    }

    #[test]
    fn test_viewing_angle_display() {
        let mut session = session();
        assert_eq!(session.viewing_angle_degrees(), 90);
        session.zoom_in();
        assert_eq!(session.viewing_angle_degrees(), 77);
        // 60 degrees entered directly is 1.047 rad, past the widest zoom step
        session.set_viewing_angle("60").unwrap();
        assert_eq!(session.viewing_angle_degrees(), 93);
        session.zoom_in();
        assert_eq!(session.viewing_angle_degrees(), 11);
    }

    #[test]
    fn test_entered_angle_snaps_back_on_zoom() {
        let mut session = session();
        session.set_viewing_angle("90").unwrap();
        assert!(session.field_of_view() > 1.0);
        session.zoom_out();
        assert_eq!(session.field_of_view(), 1.0);

        session.set_viewing_angle("80").unwrap();
        session.zoom_in();
        assert_eq!(session.field_of_view(), 0.1);
    }
}
