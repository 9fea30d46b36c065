//! Core domain types.
//!
//! This module contains the fundamental types used throughout the generator:
//! - `Colour` - RGBA colour values
//! - `Palette` - Named colour roles, scoped to one asset or character
//! - `Canvas` - The fixed-size RGBA grid every asset is painted on
//! - `SpriteDef` - A parsed asset descriptor

mod canvas;
mod colour;
mod palette;
mod sprite;

pub use canvas::{Canvas, Rect};
pub use colour::Colour;
pub use self::palette::{Palette, PaletteBuilder};
pub use sprite::{LegendEntry, SpriteBody, SpriteDef, SILHOUETTE_ROLES, TRANSPARENT_GLYPH};
