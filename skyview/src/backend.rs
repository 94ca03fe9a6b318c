//! Output backends for a rendered grid.
//!
//! The grid itself carries only glyphs and abstract colors. Backends decide
//! how to express color on the target: plain text drops it, the ANSI
//! backend emits terminal escape sequences.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::glyph::StarColor;
use crate::grid::{Cell, Grid};

/// Writes a grid to an output stream
pub trait RenderBackend {
    fn write_grid(&mut self, grid: &Grid, out: &mut dyn Write) -> io::Result<()>;
}

/// Glyphs only, one line per row
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl RenderBackend for PlainText {
    fn write_grid(&mut self, grid: &Grid, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{grid}")?;
        out.flush()
    }
}

/// Colored output using terminal escape sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiTerminal;

impl AnsiTerminal {
    pub fn terminal_color(color: StarColor) -> Color {
        match color {
            StarColor::DarkRed => Color::DarkRed,
            StarColor::Red => Color::Red,
            StarColor::DarkYellow => Color::DarkYellow,
            StarColor::Yellow => Color::Yellow,
            StarColor::White => Color::White,
            StarColor::DarkCyan => Color::DarkCyan,
            StarColor::Blue => Color::Blue,
        }
    }
}

impl RenderBackend for AnsiTerminal {
    fn write_grid(&mut self, grid: &Grid, mut out: &mut dyn Write) -> io::Result<()> {
        write_colored(grid, &mut out)
    }
}

fn write_colored<W: Write>(grid: &Grid, out: &mut W) -> io::Result<()> {
    let mut current: Option<StarColor> = None;
    for row in grid.rows() {
        for cell in row {
            match cell {
                Cell::Blank => queue!(out, Print(' '))?,
                Cell::Star { glyph, color } => {
                    if current != Some(*color) {
                        let terminal = AnsiTerminal::terminal_color(*color);
                        queue!(out, SetForegroundColor(terminal))?;
                        current = Some(*color);
                    }
                    queue!(out, Print(glyph.symbol()))?;
                }
            }
        }
        queue!(out, Print('\n'))?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}
