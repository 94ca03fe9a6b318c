//! Fixed-column bright star catalog reader.
//!
//! The catalog is a plain text file with one star per line, laid out in
//! fixed byte columns (the Yale Bright Star Catalog layout). Only the
//! fields needed for drawing a sky chart are extracted:
//!
//! ```text
//! bytes [75,77)   RA hours
//! bytes [77,79)   RA minutes
//! bytes [79,83)   RA seconds (with tenths)
//! bytes [83,86)   Dec degrees, signed
//! bytes [86,88)   Dec arcminutes
//! bytes [88,90)   Dec arcseconds
//! bytes [102,107) visual magnitude
//! byte  129       spectral class letter
//! ```
//!
//! Malformed lines are skipped rather than failing the whole read, and a
//! catalog file that cannot be opened loads as an empty catalog.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{SpectralClass, StarCatalog};
use crate::Equatorial;

const RA_HOURS: Range<usize> = 75..77;
const RA_MINUTES: Range<usize> = 77..79;
const RA_SECONDS: Range<usize> = 79..83;
const DEC_DEGREES: Range<usize> = 83..86;
const DEC_ARCMINUTES: Range<usize> = 86..88;
const DEC_ARCSECONDS: Range<usize> = 88..90;
const MAGNITUDE: Range<usize> = 102..107;
const SPECTRAL_CLASS: usize = 129;

/// Shortest line that still contains every field we read
pub const MIN_RECORD_LEN: usize = SPECTRAL_CLASS + 1;

/// Reasons a single catalog line is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record too short: {len} bytes, need at least {MIN_RECORD_LEN}")]
    TooShort { len: usize },

    #[error("invalid {field} field: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("unknown spectral class code {0:?}")]
    UnknownSpectralClass(char),
}

/// A single star read from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightStarEntry {
    /// Right ascension in hours
    pub ra_hours: f64,
    /// Declination in degrees
    pub dec_degrees: f64,
    /// Apparent visual magnitude
    pub magnitude: f64,
    /// Spectral class letter
    pub spectral_class: SpectralClass,
}

impl BrightStarEntry {
    pub fn new(
        ra_hours: f64,
        dec_degrees: f64,
        magnitude: f64,
        spectral_class: SpectralClass,
    ) -> Self {
        Self {
            ra_hours,
            dec_degrees,
            magnitude,
            spectral_class,
        }
    }

    /// Position of the star as equatorial coordinates (radians)
    pub fn position(&self) -> Equatorial {
        Equatorial::from_hours_degrees(self.ra_hours, self.dec_degrees)
    }
}

fn field_text(line: &[u8], range: Range<usize>) -> &str {
    line.get(range)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .unwrap_or("")
}

fn parse_field(
    line: &[u8],
    range: Range<usize>,
    field: &'static str,
) -> Result<f64, RecordError> {
    let text = field_text(line, range);
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RecordError::InvalidField {
            field,
            value: text.to_string(),
        }),
    }
}

/// Parse one fixed-column catalog line.
///
/// The line is handled as raw bytes so stray non-ASCII bytes outside the
/// columns we read do not disturb the offsets.
pub fn parse_record(line: &[u8]) -> Result<BrightStarEntry, RecordError> {
    if line.len() < MIN_RECORD_LEN {
        return Err(RecordError::TooShort { len: line.len() });
    }

    let magnitude = parse_field(line, MAGNITUDE, "magnitude")?;

    let code = line[SPECTRAL_CLASS];
    let spectral_class = SpectralClass::from_code(code)
        .ok_or(RecordError::UnknownSpectralClass(code as char))?;

    let ra_hours = parse_field(line, RA_HOURS, "RA hours")?
        + parse_field(line, RA_MINUTES, "RA minutes")? / 60.0
        + parse_field(line, RA_SECONDS, "RA seconds")? / 3600.0;

    // The sign lives on the degree field and covers arcminutes and
    // arcseconds too, including "-00".
    let degrees = parse_field(line, DEC_DEGREES, "Dec degrees")?;
    let negative = field_text(line, DEC_DEGREES).trim_start().starts_with('-');
    let magnitude_of_dec = degrees.abs()
        + parse_field(line, DEC_ARCMINUTES, "Dec arcminutes")? / 60.0
        + parse_field(line, DEC_ARCSECONDS, "Dec arcseconds")? / 3600.0;
    let dec_degrees = if negative {
        -magnitude_of_dec
    } else {
        magnitude_of_dec
    };

    Ok(BrightStarEntry::new(
        ra_hours,
        dec_degrees,
        magnitude,
        spectral_class,
    ))
}

/// In-memory bright star catalog
#[derive(Debug, Clone, Default)]
pub struct BrightStarCatalog {
    stars: Vec<BrightStarEntry>,
    skipped: usize,
}

impl BrightStarCatalog {
    /// Build a catalog directly from entries
    pub fn from_entries(stars: Vec<BrightStarEntry>) -> Self {
        Self { stars, skipped: 0 }
    }

    /// Read every line of `reader`, keeping the lines that parse.
    ///
    /// A read error ends the scan; whatever was read up to that point is kept.
    pub fn from_reader<R: BufRead>(reader: R) -> Self {
        let mut stars = Vec::new();
        let mut skipped = 0;

        for (index, line) in reader.split(b'\n').enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Stopped reading catalog at line {}: {}", index + 1, e);
                    break;
                }
            };

            match parse_record(&line) {
                Ok(entry) => stars.push(entry),
                Err(e) => {
                    debug!("Skipping catalog line {}: {}", index + 1, e);
                    skipped += 1;
                }
            }
        }

        Self { stars, skipped }
    }

    /// Load a catalog file.
    ///
    /// A file that cannot be opened yields an empty catalog so the viewer
    /// can still start and show an empty sky.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    "Could not open catalog '{}': {}; continuing with an empty sky",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        let catalog = Self::from_reader(BufReader::new(file));
        info!(
            "Loaded {} stars from '{}' ({} lines skipped)",
            catalog.len(),
            path.display(),
            catalog.skipped
        );
        catalog
    }

    /// Number of lines rejected while reading
    pub fn skipped_records(&self) -> usize {
        self.skipped
    }

    /// Entries as a slice, in file order
    pub fn entries(&self) -> &[BrightStarEntry] {
        &self.stars
    }
}

impl StarCatalog for BrightStarCatalog {
    type Star = BrightStarEntry;

    fn get_star(&self, id: usize) -> Option<&Self::Star> {
        self.stars.get(id)
    }

    fn stars(&self) -> impl Iterator<Item = &Self::Star> {
        self.stars.iter()
    }

    fn len(&self) -> usize {
        self.stars.len()
    }

    fn filter<F>(&self, predicate: F) -> Vec<&Self::Star>
    where
        F: Fn(&Self::Star) -> bool,
    {
        self.stars.iter().filter(|star| predicate(star)).collect()
    }
}
