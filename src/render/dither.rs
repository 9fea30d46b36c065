//! Dither and noise fills.
//!
//! A fill walks every pixel of a region and asks a [`DitherRule`] which
//! palette entry, if any, to paint there. Random rules carry their own
//! seeded generator so the same seed always yields the same texture.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::{Result, SpriteError};
use crate::types::{Canvas, Colour, Rect};

/// Chooses a palette index for a pixel, or `None` to leave it alone.
pub trait DitherRule {
    fn pick(&mut self, x: i32, y: i32) -> Option<usize>;
}

impl<F> DitherRule for F
where
    F: FnMut(i32, i32) -> Option<usize>,
{
    fn pick(&mut self, x: i32, y: i32) -> Option<usize> {
        self(x, y)
    }
}

/// Alternate entries 0 and 1 on a checkerboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checker;

impl DitherRule for Checker {
    fn pick(&mut self, x: i32, y: i32) -> Option<usize> {
        Some(if (x + y).rem_euclid(2) == 0 { 0 } else { 1 })
    }
}

/// Entry 1 wherever `(ax*x + ay*y) % period == 0`, entry 0 elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct Modulo {
    pub ax: i32,
    pub ay: i32,
    pub period: i32,
}

impl DitherRule for Modulo {
    fn pick(&mut self, x: i32, y: i32) -> Option<usize> {
        if self.period == 0 {
            return Some(0);
        }
        let v = (self.ax * x + self.ay * y).rem_euclid(self.period);
        Some(if v == 0 { 1 } else { 0 })
    }
}

/// Checkerboard of entries 0 and 1 where each cell flips to the other
/// entry with probability `density`.
#[derive(Debug, Clone)]
pub struct Speckle {
    pub rng: ChaCha8Rng,
    pub density: f32,
}

impl Speckle {
    pub fn new(rng: ChaCha8Rng, density: f32) -> Self {
        Self { rng, density }
    }
}

impl DitherRule for Speckle {
    fn pick(&mut self, x: i32, y: i32) -> Option<usize> {
        let base = if (x + y).rem_euclid(2) == 0 { 0 } else { 1 };
        if self.rng.gen::<f32>() < self.density {
            Some(1 - base)
        } else {
            Some(base)
        }
    }
}

/// Weighted random pick over the palette.
#[derive(Debug, Clone)]
pub struct Noise {
    pub rng: ChaCha8Rng,
    weights: Vec<f32>,
}

impl Noise {
    /// Weights are normalised. All must be finite and non-negative, with a
    /// positive total.
    pub fn new(rng: ChaCha8Rng, weights: &[f32]) -> Result<Self> {
        let total: f32 = weights.iter().sum();
        if weights.is_empty()
            || weights.iter().any(|w| !w.is_finite() || *w < 0.0)
            || total <= 0.0
        {
            return Err(SpriteError::canvas(format!(
                "Noise weights must be non-negative with a positive total, got {:?}",
                weights
            )));
        }

        Ok(Self {
            rng,
            weights: weights.iter().map(|w| w / total).collect(),
        })
    }
}

impl DitherRule for Noise {
    fn pick(&mut self, _x: i32, _y: i32) -> Option<usize> {
        let r: f32 = self.rng.gen();
        let mut cumulative = 0.0;
        for (i, w) in self.weights.iter().enumerate() {
            cumulative += w;
            if r < cumulative {
                return Some(i);
            }
        }
        // Rounding can leave the total a hair under one.
        Some(self.weights.len() - 1)
    }
}

/// Fill a region by consulting `rule` for each pixel.
///
/// Fails on an empty palette or when the rule returns an index past its
/// end; pixels visited before the bad index keep their new colour.
pub fn dither_fill<R: DitherRule + ?Sized>(
    canvas: &mut Canvas,
    region: Rect,
    palette: &[Colour],
    rule: &mut R,
) -> Result<()> {
    if palette.is_empty() {
        return Err(SpriteError::canvas("Dither fill needs a non-empty palette"));
    }

    for (x, y) in region.points() {
        if let Some(i) = rule.pick(x, y) {
            let colour = palette.get(i).ok_or_else(|| {
                SpriteError::canvas(format!(
                    "Dither index {} at ({}, {}) is outside a palette of {}",
                    i,
                    x,
                    y,
                    palette.len()
                ))
            })?;
            canvas.set(x, y, *colour);
        }
    }

    Ok(())
}

/// Drop `count` single pixels at random positions inside `area`.
pub fn scatter(canvas: &mut Canvas, rng: &mut ChaCha8Rng, count: usize, area: Rect, colour: Colour) {
    if area.width <= 0 || area.height <= 0 {
        return;
    }
    for _ in 0..count {
        let x = rng.gen_range(area.x..area.x + area.width);
        let y = rng.gen_range(area.y..area.y + area.height);
        canvas.set(x, y, colour);
    }
}
