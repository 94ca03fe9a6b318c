//! Character grid produced from a frame.

use std::fmt;

use crate::config::GridSize;
use crate::frame::Frame;
use crate::glyph::{Glyph, StarColor};

/// One character cell of the sky chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Star { glyph: Glyph, color: StarColor },
}

impl Cell {
    pub fn symbol(&self) -> char {
        match self {
            Cell::Blank => ' ',
            Cell::Star { glyph, .. } => glyph.symbol(),
        }
    }
}

/// Row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.size.width && y < self.size.height {
            Some(self.cells[y * self.size.width + x])
        } else {
            None
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.width)
    }

    /// Number of cells holding a star
    pub fn star_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Star { .. }))
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Walk the grid row by row, emitting each frame dot once.
///
/// The frame iterates in the same row-major order as the walk, so a single
/// forward cursor finds every dot. Dots outside `size` are never emitted.
pub fn render(frame: &Frame, size: GridSize) -> Grid {
    let mut cells = Vec::with_capacity(size.cell_count());
    let mut dots = frame
        .iter()
        .filter(|dot| dot.x < size.width && dot.y < size.height)
        .peekable();

    for y in 0..size.height {
        for x in 0..size.width {
            match dots.next_if(|dot| dot.x == x && dot.y == y) {
                Some(dot) => cells.push(Cell::Star {
                    glyph: dot.glyph,
                    color: dot.color,
                }),
                None => cells.push(Cell::Blank),
            }
        }
    }

    Grid { size, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Dot;

    fn dot(x: usize, y: usize, glyph: Glyph) -> Dot {
        Dot {
            x,
            y,
            glyph,
            color: StarColor::Yellow,
            magnitude: 1.0,
        }
    }

    #[test]
    fn test_empty_frame_is_blank() {
        let grid = render(&Frame::new(), GridSize::default());
        assert_eq!(grid.star_count(), 0);
        assert_eq!(grid.rows().count(), 50);
        assert!(grid.rows().all(|row| row.len() == 100));
    }

    #[test]
    fn test_each_dot_emitted_once() {
        let frame: Frame = vec![
            dot(0, 0, Glyph::Faint),
            dot(99, 0, Glyph::Dim),
            dot(50, 25, Glyph::Brilliant),
            dot(99, 49, Glyph::Bright),
        ]
        .into_iter()
        .collect();
        let grid = render(&frame, GridSize::default());

        assert_eq!(grid.star_count(), 4);
        assert_eq!(
            grid.get(50, 25),
            Some(Cell::Star {
                glyph: Glyph::Brilliant,
                color: StarColor::Yellow
            })
        );
        assert_eq!(grid.get(1, 0), Some(Cell::Blank));
        assert_eq!(grid.get(100, 0), None);
    }

    #[test]
    fn test_out_of_grid_dot_does_not_block_cursor() {
        let frame: Frame = vec![
            dot(3, 1, Glyph::Dim),
            dot(12, 1, Glyph::Dim),
            dot(2, 2, Glyph::Dim),
        ]
        .into_iter()
        .collect();
        let grid = render(&frame, GridSize::from_width_height(10, 5));

        assert_eq!(grid.star_count(), 2);
        assert_eq!(grid.get(2, 2).map(|c| c.symbol()), Some('*'));
    }

    #[test]
    fn test_display_text() {
        let frame: Frame = vec![dot(1, 0, Glyph::Brilliant), dot(0, 1, Glyph::Faint)]
            .into_iter()
            .collect();
        let grid = render(&frame, GridSize::from_width_height(3, 2));
        assert_eq!(grid.to_string(), " @ \n.  \n");
    }
}
