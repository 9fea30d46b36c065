//! Occupancy masks and the silhouette painter.
//!
//! Bully silhouettes are authored as a grid of filled and empty cells. The
//! painter gives every filled cell a body colour, then lights the edge
//! facing the light with a rim colour and darkens cells buried deep inside
//! the shape.

use std::fmt;

use crate::error::{Result, SpriteError};
use crate::types::{Canvas, Colour};

/// Which horizontal side of the silhouette catches the rim light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RimSide {
    #[default]
    Right,
    Left,
}

impl RimSide {
    /// Horizontal offset of the neighbour that decides the rim.
    fn dx(self) -> i32 {
        match self {
            RimSide::Right => 1,
            RimSide::Left => -1,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "right" => Ok(RimSide::Right),
            "left" => Ok(RimSide::Left),
            other => Err(SpriteError::Parse {
                message: format!("Unknown rim side '{}'", other),
                help: Some("Use rim: left or rim: right".to_string()),
            }),
        }
    }
}

impl fmt::Display for RimSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RimSide::Right => write!(f, "right"),
            RimSide::Left => write!(f, "left"),
        }
    }
}

/// A boolean occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// Build a mask from text rows, where `filled` marks an occupied cell.
    ///
    /// Every row must have the same width.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], filled: char) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());

        if width == 0 || height == 0 {
            return Err(SpriteError::canvas("Mask must have at least one row and column"));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(SpriteError::Definition {
                    message: format!("Mask row {} is {} wide, expected {}", y, len, width),
                    help: Some("All mask rows must be the same width".to_string()),
                });
            }
            cells.extend(row.chars().map(|c| c == filled));
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is occupied. Cells off the mask are empty.
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &filled)| filled)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width as i32 {
                write!(f, "{}", if self.is_filled(x, y) { 'x' } else { '.' })?;
            }
        }
        Ok(())
    }
}

/// Colours and light direction for [`paint_silhouette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilhouetteStyle {
    pub body: Colour,
    pub rim: Colour,
    pub shadow: Colour,
    pub rim_side: RimSide,
}

/// Offsets sampled by the deep-shadow pass.
const DEEP_OFFSETS: [(i32, i32); 8] = [
    (-2, -2),
    (0, -2),
    (2, -2),
    (-2, 0),
    (2, 0),
    (-2, 2),
    (0, 2),
    (2, 2),
];

/// Paint a masked silhouette onto a canvas.
///
/// Rim: the neighbour on `rim_side` is empty, or else the neighbour above
/// is empty (never on row 0). Shadow: all eight cells two steps away are
/// occupied. All lookups read the mask, never the canvas.
pub fn paint_silhouette(canvas: &mut Canvas, mask: &Mask, style: &SilhouetteStyle) {
    for (x, y) in mask.filled_cells() {
        canvas.set(x, y, style.body);
    }

    let dx = style.rim_side.dx();
    for (x, y) in mask.filled_cells() {
        let side_open = !mask.is_filled(x + dx, y);
        let top_open = y > 0 && !mask.is_filled(x, y - 1);
        if side_open || top_open {
            canvas.set(x, y, style.rim);
        }
    }

    for (x, y) in mask.filled_cells() {
        if DEEP_OFFSETS
            .iter()
            .all(|(ox, oy)| mask.is_filled(x + ox, y + oy))
        {
            canvas.set(x, y, style.shadow);
        }
    }
}
