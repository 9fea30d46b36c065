//! Rendering primitives.
//!
//! Everything that paints onto a [`Canvas`](crate::types::Canvas): radial
//! glows, dither and noise textures, mirroring, silhouettes, and PNG output.

mod dither;
mod gradient;
mod mirror;
mod png;
mod silhouette;

pub use dither::{dither_fill, scatter, Checker, DitherRule, Modulo, Noise, Speckle};
pub use gradient::{radial_gradient, Band, BandFill};
pub use mirror::mirror_horizontal;
pub use png::{read_png, scale_canvas, scaled_size, write_png};
pub use silhouette::{paint_silhouette, Mask, RimSide, SilhouetteStyle};
