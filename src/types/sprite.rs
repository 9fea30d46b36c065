//! Sprite descriptors.
//!
//! A sprite descriptor is the data form of one fixed-layout asset: a grid of
//! glyphs with a legend, an occupancy mask painted as a silhouette, or a
//! horizontal mirror of another sprite.
//!
//! # Example
//!
//! ```markdown
//! ---
//! name: heart_full
//! size: 8x8
//! palette:
//!   base: "#E02020"
//! ---
//!
//! ```px
//! .BB..BB.
//! ```
//!
//! ---
//! B: $base
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Result, SpriteError};
use crate::render::{paint_silhouette, Mask, RimSide, SilhouetteStyle};

use super::{Canvas, Colour, Palette};

/// Glyph that always means "leave this pixel transparent".
pub const TRANSPARENT_GLYPH: char = '.';

/// What a legend glyph paints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendEntry {
    /// A palette role: `O: $outline`
    Role(String),
    /// A literal colour: `s: #F2C8A0`
    Literal(Colour),
}

impl fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegendEntry::Role(role) => write!(f, "${}", role),
            LegendEntry::Literal(colour) => write!(f, "{}", colour),
        }
    }
}

/// The layout part of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteBody {
    /// Glyph grid (row-major: `grid[y][x]`) plus its legend.
    Pixels {
        grid: Vec<Vec<char>>,
        legend: BTreeMap<char, LegendEntry>,
    },
    /// Occupancy mask painted with the `body`, `rim` and `shadow` roles.
    Silhouette { mask: Mask, rim: RimSide },
    /// Left-to-right flip of another sprite in the same group.
    Mirror { source: String },
}

/// A parsed sprite descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDef {
    pub name: String,
    /// `(width, height)`; `None` for mirrors, which take their source's size.
    pub size: Option<(u32, u32)>,
    pub palette: Palette,
    pub body: SpriteBody,
    /// 1-indexed line of the descriptor in its source file.
    pub line: u32,
}

/// Palette roles a silhouette is painted with.
pub const SILHOUETTE_ROLES: [&str; 3] = ["body", "rim", "shadow"];

impl SpriteDef {
    /// The mirror source, if this sprite is a mirror.
    pub fn mirror_source(&self) -> Option<&str> {
        match &self.body {
            SpriteBody::Mirror { source } => Some(source),
            _ => None,
        }
    }

    pub fn is_mirror(&self) -> bool {
        self.mirror_source().is_some()
    }

    /// Resolve one legend entry against this sprite's palette.
    pub fn resolve(&self, entry: &LegendEntry) -> Result<Colour> {
        match entry {
            LegendEntry::Role(role) => self.palette.role(role).map_err(|e| self.context(e)),
            LegendEntry::Literal(colour) => Ok(*colour),
        }
    }

    /// Glyphs that appear in the grid, excluding transparent cells.
    pub fn used_glyphs(&self) -> BTreeSet<char> {
        match &self.body {
            SpriteBody::Pixels { grid, .. } => grid
                .iter()
                .flatten()
                .copied()
                .filter(|&g| g != TRANSPARENT_GLYPH)
                .collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Palette roles this sprite actually paints with.
    pub fn used_roles(&self) -> BTreeSet<String> {
        match &self.body {
            SpriteBody::Pixels { legend, .. } => {
                let used = self.used_glyphs();
                legend
                    .iter()
                    .filter(|(glyph, _)| used.contains(glyph))
                    .filter_map(|(_, entry)| match entry {
                        LegendEntry::Role(role) => Some(role.clone()),
                        LegendEntry::Literal(_) => None,
                    })
                    .collect()
            }
            SpriteBody::Silhouette { .. } => {
                SILHOUETTE_ROLES.iter().map(|r| r.to_string()).collect()
            }
            SpriteBody::Mirror { .. } => BTreeSet::new(),
        }
    }

    /// Paint this sprite onto a fresh canvas.
    ///
    /// Mirrors cannot be rendered on their own; render the source and flip
    /// it with [`crate::render::mirror_horizontal`].
    pub fn render(&self) -> Result<Canvas> {
        let (width, height) = self.size.ok_or_else(|| {
            self.context(SpriteError::definition("sprite has no size"))
        })?;
        let mut canvas = Canvas::new(width, height)?;

        match &self.body {
            SpriteBody::Pixels { grid, legend } => {
                for (y, row) in grid.iter().enumerate() {
                    for (x, &glyph) in row.iter().enumerate() {
                        if glyph == TRANSPARENT_GLYPH {
                            continue;
                        }
                        let entry = legend.get(&glyph).ok_or_else(|| {
                            self.context(SpriteError::definition(format!(
                                "glyph '{}' is not in the legend",
                                glyph
                            )))
                        })?;
                        canvas.set(x as i32, y as i32, self.resolve(entry)?);
                    }
                }
            }
            SpriteBody::Silhouette { mask, rim } => {
                let style = SilhouetteStyle {
                    body: self.resolve(&LegendEntry::Role("body".into()))?,
                    rim: self.resolve(&LegendEntry::Role("rim".into()))?,
                    shadow: self.resolve(&LegendEntry::Role("shadow".into()))?,
                    rim_side: *rim,
                };
                paint_silhouette(&mut canvas, mask, &style);
            }
            SpriteBody::Mirror { source } => {
                return Err(self.context(SpriteError::Definition {
                    message: format!("mirror of '{}' must be rendered from its source", source),
                    help: None,
                }));
            }
        }

        Ok(canvas)
    }

    /// Prefix an error message with this sprite's name and line.
    pub fn context(&self, err: SpriteError) -> SpriteError {
        match err {
            SpriteError::Definition { message, help } => SpriteError::Definition {
                message: format!("{} (line {}): {}", self.name, self.line, message),
                help,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(rows: &[&str], legend: &[(char, LegendEntry)], palette: Palette) -> SpriteDef {
        let grid: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        SpriteDef {
            name: "test".to_string(),
            size: Some((grid[0].len() as u32, grid.len() as u32)),
            palette,
            body: SpriteBody::Pixels {
                grid,
                legend: legend.iter().cloned().collect(),
            },
            line: 3,
        }
    }

    #[test]
    fn test_render_pixels() {
        let red = Colour::rgb(255, 0, 0);
        let palette = Palette::from_colours("p", [("red", red)]);
        let sprite = pixels(
            &["R.", ".W"],
            &[
                ('R', LegendEntry::Role("red".into())),
                ('W', LegendEntry::Literal(Colour::WHITE)),
            ],
            palette,
        );

        let canvas = sprite.render().unwrap();

        assert_eq!(canvas.get(0, 0), red);
        assert_eq!(canvas.get(1, 1), Colour::WHITE);
        assert_eq!(canvas.opaque_count(), 2);
    }

    #[test]
    fn test_used_glyphs_and_roles() {
        let palette = Palette::from_colours("p", [("a", Colour::BLACK), ("b", Colour::WHITE)]);
        let sprite = pixels(
            &["A.A"],
            &[
                ('A', LegendEntry::Role("a".into())),
                ('B', LegendEntry::Role("b".into())),
            ],
            palette,
        );

        assert_eq!(sprite.used_glyphs().into_iter().collect::<Vec<_>>(), vec!['A']);
        assert_eq!(sprite.used_roles().into_iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_undefined_role_names_sprite() {
        let sprite = pixels(
            &["X"],
            &[('X', LegendEntry::Role("nope".into()))],
            Palette::new("p"),
        );

        let err = sprite.render().unwrap_err().to_string();
        assert!(err.contains("test (line 3)"));
        assert!(err.contains("nope"));
    }

    #[test]
    fn test_render_silhouette() {
        let palette = Palette::from_colours(
            "s",
            [
                ("body", Colour::rgb(1, 1, 1)),
                ("rim", Colour::rgb(2, 2, 2)),
                ("shadow", Colour::rgb(3, 3, 3)),
            ],
        );
        let sprite = SpriteDef {
            name: "sil".into(),
            size: Some((3, 1)),
            palette,
            body: SpriteBody::Silhouette {
                mask: Mask::from_rows(&["xx."], 'x').unwrap(),
                rim: RimSide::Right,
            },
            line: 1,
        };

        let canvas = sprite.render().unwrap();
        assert_eq!(canvas.get(0, 0), Colour::rgb(1, 1, 1));
        assert_eq!(canvas.get(1, 0), Colour::rgb(2, 2, 2));
        assert_eq!(canvas.get(2, 0), Colour::TRANSPARENT);
    }

    #[test]
    fn test_mirror_cannot_render_alone() {
        let sprite = SpriteDef {
            name: "idle_right".into(),
            size: None,
            palette: Palette::new("p"),
            body: SpriteBody::Mirror {
                source: "idle_left".into(),
            },
            line: 1,
        };

        assert_eq!(sprite.mirror_source(), Some("idle_left"));
        assert!(sprite.render().is_err());
    }
}
