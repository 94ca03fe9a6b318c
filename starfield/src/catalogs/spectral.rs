use serde::{Deserialize, Serialize};
use std::fmt;

/// Harvard spectral class, hottest (O) to coolest (M).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    /// All classes in temperature order
    pub const ALL: [SpectralClass; 7] = [
        SpectralClass::O,
        SpectralClass::B,
        SpectralClass::A,
        SpectralClass::F,
        SpectralClass::G,
        SpectralClass::K,
        SpectralClass::M,
    ];

    /// Parse the single-letter catalog code. Returns None for anything
    /// outside {O,B,A,F,G,K,M}, including lowercase letters.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'O' => Some(SpectralClass::O),
            b'B' => Some(SpectralClass::B),
            b'A' => Some(SpectralClass::A),
            b'F' => Some(SpectralClass::F),
            b'G' => Some(SpectralClass::G),
            b'K' => Some(SpectralClass::K),
            b'M' => Some(SpectralClass::M),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            SpectralClass::O => 'O',
            SpectralClass::B => 'B',
            SpectralClass::A => 'A',
            SpectralClass::F => 'F',
            SpectralClass::G => 'G',
            SpectralClass::K => 'K',
            SpectralClass::M => 'M',
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
