//! Faint-star cutoff.
//!
//! Narrow fields of view show fainter stars: the cutoff rises as the field
//! of view parameter shrinks.

use starfield::catalogs::{BrightStarEntry, StarCatalog};

use crate::config::MagnitudeLimit;

/// Magnitude threshold for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityFilter {
    cutoff: f64,
}

impl VisibilityFilter {
    pub fn new(limit: &MagnitudeLimit, field_of_view: f64) -> Self {
        Self {
            cutoff: limit.cutoff(field_of_view),
        }
    }

    /// Faintest magnitude that is still drawn
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Stars at exactly the cutoff are visible
    pub fn is_visible(&self, magnitude: f64) -> bool {
        magnitude <= self.cutoff
    }

    /// Catalog entries bright enough to draw, in catalog order
    pub fn visible_stars<'a, C>(&self, catalog: &'a C) -> impl Iterator<Item = &'a BrightStarEntry>
    where
        C: StarCatalog<Star = BrightStarEntry>,
    {
        let filter = *self;
        catalog
            .stars()
            .filter(move |star| filter.is_visible(star.magnitude))
    }
}
