//! The pixel canvas every asset is painted onto.
//!
//! Coordinates are signed so that shapes may extend past the edges; any
//! write outside the canvas is dropped and any read outside it yields
//! [`Colour::TRANSPARENT`].
//!
//! Regions are always given as origin plus extent, half-open:
//! `fill_rect(x0, y0, w, h, c)` covers `x0..x0 + w` by `y0..y0 + h`.

use crate::error::{Result, SpriteError};

use super::Colour;

/// A rectangular region given as origin and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether a point lies inside the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// All points of the region in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (i32, i32)> {
        let Rect {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height.max(0)).flat_map(move |py| (x..x + width.max(0)).map(move |px| (px, py)))
    }
}

/// A fixed-size RGBA pixel grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SpriteError::canvas(format!(
                "Canvas dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            pixels: vec![Colour::TRANSPARENT; width as usize * height as usize],
        })
    }

    /// Create a canvas filled with one colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Result<Self> {
        let mut canvas = Self::new(width, height)?;
        canvas.fill(colour);
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Overwrite one pixel. Off-canvas writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, colour: Colour) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = colour;
        }
    }

    /// Read one pixel. Off-canvas reads are transparent.
    pub fn get(&self, x: i32, y: i32) -> Colour {
        self.index(x, y)
            .map(|i| self.pixels[i])
            .unwrap_or(Colour::TRANSPARENT)
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, colour: Colour) {
        self.pixels.fill(colour);
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, width: i32, height: i32, colour: Colour) {
        for (x, y) in Rect::new(x0, y0, width, height).points() {
            self.set(x, y, colour);
        }
    }

    pub fn hline(&mut self, x0: i32, y: i32, len: i32, colour: Colour) {
        self.fill_rect(x0, y, len, 1, colour);
    }

    pub fn vline(&mut self, x: i32, y0: i32, len: i32, colour: Colour) {
        self.fill_rect(x, y0, 1, len, colour);
    }

    /// Write a run of colours starting at `(x0, y)`.
    pub fn set_row(&mut self, y: i32, x0: i32, colours: &[Colour]) {
        for (dx, &colour) in colours.iter().enumerate() {
            self.set(x0 + dx as i32, y, colour);
        }
    }

    /// Count of pixels with non-zero alpha.
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|c| !c.is_transparent()).count()
    }

    /// Flat RGBA8 bytes, row-major.
    pub fn to_rgba_buffer(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }
}
