//! spritegen - Pixel-art asset generator for a 2D RPG
//!
//! Paints every sprite, tile and UI element of the game onto small RGBA
//! canvases and writes them as PNG files. Fixed-layout art lives in
//! `*.sprite.md` descriptor files; textured tiles and glowing collectibles
//! come from seeded procedural generators.

pub mod assets;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod validation;

pub use catalog::{derive_seed, Asset, AssetGroup, AssetSource, Catalog, Layout};
pub use config::{Config, CONFIG_FILENAME, MAX_SCALE};
pub use error::{Result, SpriteError};
pub use render::{mirror_horizontal, read_png, write_png};
pub use types::{Canvas, Colour, Palette, SpriteDef};
pub use validation::{validate_catalog, verify_outputs, Diagnostic, Severity, ValidationResult};
