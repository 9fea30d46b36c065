//! Parser modules for sprite descriptor files.
//!
//! Fixed-layout art is stored as markdown-style descriptor files. Each file
//! can contain one or more documents.
//!
//! # Document Structure
//!
//! Each document has:
//! - YAML frontmatter between `---` markers (must include `name:`)
//! - Optional body content inside a px code fence
//! - Optional legend section with glyph mappings
//!
//! # Usage
//!
//! ```ignore
//! use spritegen::parser::parse_sprite_file;
//!
//! let source = std::fs::read_to_string("art/player.sprite.md")?;
//! let file = parse_sprite_file(&source)?;
//!
//! for sprite in &file.sprites {
//!     println!("Found: {}", sprite.name);
//! }
//! ```

mod body;
mod document;
mod frontmatter;
mod legend;
pub mod span;
pub mod sprite;
pub mod types;

pub use document::parse_documents;
pub use span::{Location, Span, Spanned};
pub use sprite::{parse_sprite_file, SpriteFile};
pub use types::{LegendValue, RawDocument};
