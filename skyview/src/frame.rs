//! Projected stars for one render, at most one per screen cell.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::glyph::{Glyph, StarColor};

/// A star placed on a screen cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// Screen column
    pub x: usize,
    /// Screen row
    pub y: usize,
    pub glyph: Glyph,
    pub color: StarColor,
    /// Source magnitude, kept to settle overlaps
    pub magnitude: f64,
}

/// Deduplicated set of dots keyed by cell, iterated in row-major order.
///
/// When several stars land on one cell the brightest (lowest magnitude)
/// is kept. Equal magnitudes keep the star inserted first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    // Keyed (row, column) so iteration order is row-major
    dots: BTreeMap<(usize, usize), Dot>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate dot. Returns true if it now occupies its cell.
    pub fn insert(&mut self, dot: Dot) -> bool {
        match self.dots.entry((dot.y, dot.x)) {
            Entry::Vacant(slot) => {
                slot.insert(dot);
                true
            }
            Entry::Occupied(mut slot) => {
                if dot.magnitude < slot.get().magnitude {
                    slot.insert(dot);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Dot at (x, y), if any
    pub fn get(&self, x: usize, y: usize) -> Option<&Dot> {
        self.dots.get(&(y, x))
    }

    /// Dots ordered by row, then column
    pub fn iter(&self) -> impl Iterator<Item = &Dot> {
        self.dots.values()
    }
}

impl FromIterator<Dot> for Frame {
    fn from_iter<I: IntoIterator<Item = Dot>>(iter: I) -> Self {
        let mut frame = Frame::new();
        for dot in iter {
            frame.insert(dot);
        }
        frame
    }
}

impl Extend<Dot> for Frame {
    fn extend<I: IntoIterator<Item = Dot>>(&mut self, iter: I) {
        for dot in iter {
            self.insert(dot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(x: usize, y: usize, magnitude: f64) -> Dot {
        Dot {
            x,
            y,
            glyph: Glyph::classify(magnitude, 3.87),
            color: StarColor::White,
            magnitude,
        }
    }

    #[test]
    fn test_brightest_wins_either_order() {
        let faint_first: Frame = vec![dot(5, 5, 3.0), dot(5, 5, 1.0)].into_iter().collect();
        let bright_first: Frame = vec![dot(5, 5, 1.0), dot(5, 5, 3.0)].into_iter().collect();

        assert_eq!(faint_first.len(), 1);
        assert_eq!(faint_first.get(5, 5).unwrap().magnitude, 1.0);
        assert_eq!(faint_first, bright_first);
    }

    #[test]
    fn test_equal_magnitude_keeps_first() {
        let mut frame = Frame::new();
        let mut first = dot(1, 1, 2.0);
        first.color = StarColor::Blue;
        let mut second = dot(1, 1, 2.0);
        second.color = StarColor::Red;

        assert!(frame.insert(first));
        assert!(!frame.insert(second));
        assert_eq!(frame.get(1, 1).unwrap().color, StarColor::Blue);
    }

    #[test]
    fn test_row_major_order() {
        let frame: Frame = vec![dot(3, 2, 1.0), dot(9, 0, 1.0), dot(0, 2, 1.0), dot(7, 1, 1.0)]
            .into_iter()
            .collect();

        let cells: Vec<(usize, usize)> = frame.iter().map(|d| (d.x, d.y)).collect();
        assert_eq!(cells, vec![(9, 0), (7, 1), (0, 2), (3, 2)]);
    }

    #[test]
    fn test_cells_are_unique() {
        let mut frame = Frame::new();
        frame.extend((0..50).map(|i| dot(i % 7, i % 3, i as f64 * 0.1)));

        let mut seen = std::collections::HashSet::new();
        for d in frame.iter() {
            assert!(seen.insert((d.x, d.y)));
        }
        assert_eq!(frame.len(), 21);
    }
}
