//! Star catalog parsing and celestial coordinate utilities.
//!
//! This crate provides the catalog side of the sky viewer: typed star
//! entries read from fixed-column text catalogs, spectral classification,
//! and equatorial coordinates with conversion to unit vectors on the
//! celestial sphere.
//!
//! # Examples
//!
//! ```no_run
//! use starfield::catalogs::{BrightStarCatalog, StarCatalog};
//!
//! let catalog = BrightStarCatalog::load("data.DAT");
//! println!("Loaded {} stars", catalog.len());
//! ```

pub mod catalogs;
pub mod coordinates;

pub use coordinates::Equatorial;
