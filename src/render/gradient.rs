//! Radial band fills for glows and orbs.

use crate::error::{Result, SpriteError};
use crate::types::{Canvas, Colour};

/// How a band colours the pixels that fall in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandFill {
    /// One flat colour.
    Solid(Colour),
    /// One colour whose alpha runs linearly from `inner_alpha` at the
    /// previous band's edge to `outer_alpha` at this band's edge.
    Fade {
        colour: Colour,
        inner_alpha: u8,
        outer_alpha: u8,
    },
}

/// A ring of the gradient, covering distances up to `max_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub max_distance: f32,
    pub fill: BandFill,
}

impl Band {
    pub const fn solid(max_distance: f32, colour: Colour) -> Self {
        Self {
            max_distance,
            fill: BandFill::Solid(colour),
        }
    }

    /// A soft halo ring. The built-in collectibles stick to flat bands;
    /// this is for glows whose edge should blend into what lies beneath.
    pub const fn fade(max_distance: f32, colour: Colour, inner_alpha: u8, outer_alpha: u8) -> Self {
        Self {
            max_distance,
            fill: BandFill::Fade {
                colour,
                inner_alpha,
                outer_alpha,
            },
        }
    }

    fn colour_at(&self, inner_edge: f32, d: f32) -> Colour {
        match self.fill {
            BandFill::Solid(colour) => colour,
            BandFill::Fade {
                colour,
                inner_alpha,
                outer_alpha,
            } => {
                let span = self.max_distance - inner_edge;
                let t = if span > 0.0 {
                    ((d - inner_edge) / span).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let a = inner_alpha as f32 + (outer_alpha as f32 - inner_alpha as f32) * t;
                colour.with_alpha(a.round().clamp(0.0, 255.0) as u8)
            }
        }
    }
}

fn check_bands(center: (f32, f32), bands: &[Band]) -> Result<()> {
    if bands.is_empty() {
        return Err(SpriteError::canvas("Radial gradient needs at least one band"));
    }
    if !center.0.is_finite() || !center.1.is_finite() {
        return Err(SpriteError::canvas(format!(
            "Radial gradient centre must be finite, got ({}, {})",
            center.0, center.1
        )));
    }

    let mut previous = f32::NEG_INFINITY;
    for (i, band) in bands.iter().enumerate() {
        let d = band.max_distance;
        if !d.is_finite() || d < 0.0 {
            return Err(SpriteError::canvas(format!(
                "Band {} has invalid distance {}",
                i, d
            )));
        }
        if d <= previous {
            return Err(SpriteError::canvas(format!(
                "Bands must be in strictly ascending order: band {} ({}) follows {}",
                i, d, previous
            )));
        }
        previous = d;
    }

    Ok(())
}

/// Colour pixels by their distance from a floating-point centre.
///
/// Each pixel takes the first band whose `max_distance` is at least its
/// distance (boundaries inclusive). Pixels past the last band are left
/// as they are.
pub fn radial_gradient(canvas: &mut Canvas, center: (f32, f32), bands: &[Band]) -> Result<()> {
    check_bands(center, bands)?;

    let (cx, cy) = center;
    for y in 0..canvas.height() as i32 {
        for x in 0..canvas.width() as i32 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let d = (dx * dx + dy * dy).sqrt();

            let mut inner_edge = 0.0;
            for band in bands {
                if d <= band.max_distance {
                    canvas.set(x, y, band.colour_at(inner_edge, d));
                    break;
                }
                inner_edge = band.max_distance;
            }
        }
    }

    Ok(())
}
