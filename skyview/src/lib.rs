//! Console sky chart core.
//!
//! Turns a star catalog and a viewing direction into a 100x50 character
//! chart. The pipeline for one render is:
//!
//! 1. **Visibility**: drop stars fainter than a cutoff that rises as the
//!    field of view narrows ([`visibility`]).
//! 2. **Projection**: place each remaining star on the tangent plane at the
//!    view center and quantize to a grid cell ([`projection`]).
//! 3. **Classification**: pick a glyph from the star's brightness relative
//!    to the cutoff and a color from its spectral class ([`glyph`]).
//! 4. **Overlap**: keep the brightest star per cell ([`frame`]).
//! 5. **Grid**: walk the cells in row-major order ([`grid`]) and hand the
//!    result to an output [`backend`].
//!
//! The mutable view lives in a [`session::Session`]; each render works on
//! an immutable [`Viewpoint`] snapshot.
//!
//! # Examples
//!
//! ```
//! use skyview::{render_sky, SkyConfig, Viewpoint};
//! use starfield::catalogs::{BrightStarCatalog, BrightStarEntry, SpectralClass};
//!
//! let catalog = BrightStarCatalog::from_entries(vec![
//!     BrightStarEntry::new(0.0, 0.0, 0.5, SpectralClass::A),
//! ]);
//! let grid = render_sky(&Viewpoint::default(), &catalog, &SkyConfig::default());
//! assert_eq!(grid.star_count(), 1);
//! ```

pub mod backend;
pub mod command;
pub mod config;
pub mod frame;
pub mod glyph;
pub mod grid;
pub mod projection;
pub mod session;
pub mod viewpoint;
pub mod visibility;

pub use config::{ConfigError, GridSize, SkyConfig};
pub use frame::{Dot, Frame};
pub use glyph::{Glyph, StarColor};
pub use grid::{render, Cell, Grid};
pub use projection::project;
pub use session::Session;
pub use viewpoint::Viewpoint;

use starfield::catalogs::{BrightStarEntry, StarCatalog};

/// Project and grid a catalog in one step
pub fn render_sky<C>(viewpoint: &Viewpoint, catalog: &C, config: &SkyConfig) -> Grid
where
    C: StarCatalog<Star = BrightStarEntry>,
{
    render(&project(viewpoint, catalog, config), config.grid)
}
