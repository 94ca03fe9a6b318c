//! Brightness glyphs and spectral colors.

use serde::{Deserialize, Serialize};
use starfield::catalogs::SpectralClass;
use std::fmt;

/// Draw symbol for a star, one per brightness tier.
///
/// Variants are ordered brightest first so `Ord` ranks brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Glyph {
    /// More than three magnitudes above the cutoff
    Brilliant,
    /// Two to three magnitudes above the cutoff
    Bright,
    /// One to two magnitudes above the cutoff
    Dim,
    /// Within one magnitude of the cutoff
    Faint,
}

impl Glyph {
    /// Pick the tier for a star of magnitude `magnitude` given the render cutoff
    pub fn classify(magnitude: f64, cutoff: f64) -> Self {
        if magnitude > cutoff - 1.0 {
            Glyph::Faint
        } else if magnitude > cutoff - 2.0 {
            Glyph::Dim
        } else if magnitude > cutoff - 3.0 {
            Glyph::Bright
        } else {
            Glyph::Brilliant
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Glyph::Faint => '.',
            Glyph::Dim => '*',
            Glyph::Bright => '#',
            Glyph::Brilliant => '@',
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Star color, one per spectral class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarColor {
    DarkRed,
    Red,
    DarkYellow,
    Yellow,
    White,
    DarkCyan,
    Blue,
}

impl StarColor {
    pub fn for_class(class: SpectralClass) -> Self {
        match class {
            SpectralClass::M => StarColor::DarkRed,
            SpectralClass::K => StarColor::Red,
            SpectralClass::G => StarColor::DarkYellow,
            SpectralClass::F => StarColor::Yellow,
            SpectralClass::A => StarColor::White,
            SpectralClass::B => StarColor::DarkCyan,
            SpectralClass::O => StarColor::Blue,
        }
    }

    /// 4-bit console text attribute for this color
    pub fn console_attribute(&self) -> u8 {
        match self {
            StarColor::DarkRed => 4,
            StarColor::Red => 12,
            StarColor::DarkYellow => 6,
            StarColor::Yellow => 14,
            StarColor::White => 15,
            StarColor::DarkCyan => 3,
            StarColor::Blue => 9,
        }
    }
}

impl From<SpectralClass> for StarColor {
    fn from(class: SpectralClass) -> Self {
        Self::for_class(class)
    }
}
