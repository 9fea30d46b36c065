//! Sprite descriptor file parser.
//!
//! Parses `.sprite.md` files into shared palettes and [`SpriteDef`]s.
//! Every check that can fail does so here, at load time: unknown glyphs,
//! unknown palette roles, and grids that do not match their declared size
//! never reach the renderer.

use std::collections::{BTreeMap, BTreeSet};

use serde_yaml::Value;

use crate::error::{Result, SpriteError};
use crate::parser::body::body_rows;
use crate::parser::types::LegendValue;
use crate::parser::{parse_documents, RawDocument};
use crate::render::{Mask, RimSide};
use crate::types::{
    Colour, LegendEntry, Palette, PaletteBuilder, SpriteBody, SpriteDef, SILHOUETTE_ROLES,
    TRANSPARENT_GLYPH,
};

/// Glyph marking an occupied cell in a silhouette body.
const SILHOUETTE_GLYPH: char = 'x';

/// Everything defined in one descriptor file.
#[derive(Debug, Clone, Default)]
pub struct SpriteFile {
    /// Named palettes (`kind: palette` documents)
    pub palettes: BTreeMap<String, Palette>,
    /// Sprites in file order
    pub sprites: Vec<SpriteDef>,
}

/// Parse a descriptor file.
///
/// Palette documents may appear anywhere in the file; sprites refer to
/// them by name with `palette: <name>`.
pub fn parse_sprite_file(source: &str) -> Result<SpriteFile> {
    let documents = parse_documents(source)?;

    let (palette_docs, sprite_docs): (Vec<_>, Vec<_>) = documents
        .into_iter()
        .partition(|doc| doc.get_frontmatter_str("kind") == Some("palette"));

    let mut palettes = BTreeMap::new();
    for doc in palette_docs {
        let palette = parse_palette_document(&doc)?;
        if palettes.insert(palette.name.clone(), palette).is_some() {
            return Err(doc_error(&doc, "palette is defined twice"));
        }
    }

    let sprites = sprite_docs
        .iter()
        .map(|doc| parse_sprite_document(doc, &palettes))
        .collect::<Result<Vec<_>>>()?;

    Ok(SpriteFile { palettes, sprites })
}

fn doc_error(doc: &RawDocument, message: impl std::fmt::Display) -> SpriteError {
    SpriteError::Definition {
        message: format!("{} (line {}): {}", doc.name.value, doc.line(), message),
        help: None,
    }
}

/// Build a named palette from a `kind: palette` document.
fn parse_palette_document(doc: &RawDocument) -> Result<Palette> {
    let colours = doc
        .get_frontmatter("colours")
        .ok_or_else(|| doc_error(doc, "palette document needs a `colours:` mapping"))?;

    palette_from_mapping(doc, &doc.name.value, &colours.value)
}

/// Resolve a YAML `role: value` mapping into a palette.
fn palette_from_mapping(doc: &RawDocument, name: &str, value: &Value) -> Result<Palette> {
    let mapping = value
        .as_mapping()
        .ok_or_else(|| doc_error(doc, "palette must be a mapping of role: colour"))?;

    let mut builder = PaletteBuilder::new(name);
    for (role, colour) in mapping {
        let role = role
            .as_str()
            .ok_or_else(|| doc_error(doc, "palette role names must be strings"))?;
        let colour = colour.as_str().ok_or_else(|| SpriteError::Definition {
            message: format!(
                "{} (line {}): palette role '{}' has no colour",
                doc.name.value,
                doc.line(),
                role
            ),
            help: Some("Quote hex colours in YAML: outline: \"#181425\"".to_string()),
        })?;
        builder.define(role, colour)?;
    }

    builder.build().map_err(|e| doc_error(doc, e))
}

/// Parse `WxH`.
fn parse_size(doc: &RawDocument) -> Result<Option<(u32, u32)>> {
    let Some(size) = doc.get_frontmatter("size") else {
        return Ok(None);
    };

    let text = size
        .value
        .as_str()
        .ok_or_else(|| doc_error(doc, "size must be written as WIDTHxHEIGHT"))?;

    let parsed = text
        .split_once('x')
        .and_then(|(w, h)| Some((w.trim().parse().ok()?, h.trim().parse().ok()?)));

    match parsed {
        Some((w, h)) if w > 0 && h > 0 => Ok(Some((w, h))),
        _ => Err(SpriteError::Definition {
            message: format!(
                "{} (line {}): invalid size '{}'",
                doc.name.value,
                size.line(),
                text
            ),
            help: Some("Use WIDTHxHEIGHT, e.g. size: 16x24".to_string()),
        }),
    }
}

/// Resolve the sprite's `palette:` field.
fn resolve_palette(doc: &RawDocument, palettes: &BTreeMap<String, Palette>) -> Result<Palette> {
    match doc.get_frontmatter("palette").map(|p| &p.value) {
        None => Ok(Palette::new(doc.name.value.clone())),
        Some(Value::String(name)) => palettes.get(name).cloned().ok_or_else(|| {
            SpriteError::Definition {
                message: format!(
                    "{} (line {}): unknown palette '{}'",
                    doc.name.value,
                    doc.line(),
                    name
                ),
                help: Some(format!(
                    "Known palettes: {}",
                    palettes.keys().cloned().collect::<Vec<_>>().join(", ")
                )),
            }
        }),
        Some(mapping @ Value::Mapping(_)) => palette_from_mapping(doc, &doc.name.value, mapping),
        Some(_) => Err(doc_error(doc, "palette must be a palette name or a mapping")),
    }
}

fn parse_sprite_document(
    doc: &RawDocument,
    palettes: &BTreeMap<String, Palette>,
) -> Result<SpriteDef> {
    let name = doc.name.value.clone();
    let size = parse_size(doc)?;

    if let Some(source) = doc.get_frontmatter_str("mirror") {
        if doc.body.is_some() {
            return Err(doc_error(doc, "a mirror sprite cannot also have a body"));
        }
        return Ok(SpriteDef {
            name,
            size,
            palette: Palette::new(doc.name.value.clone()),
            body: SpriteBody::Mirror {
                source: source.to_string(),
            },
            line: doc.line(),
        });
    }

    let (width, height) =
        size.ok_or_else(|| doc_error(doc, "missing required `size: WIDTHxHEIGHT`"))?;
    let palette = resolve_palette(doc, palettes)?;

    let body = doc
        .body
        .as_ref()
        .ok_or_else(|| doc_error(doc, "missing ```px body"))?;
    let rows = body_rows(body);

    if rows.len() != height as usize {
        return Err(SpriteError::Definition {
            message: format!(
                "{} (line {}): grid has {} rows, size says {}",
                name,
                body.line(),
                rows.len(),
                height
            ),
            help: None,
        });
    }
    for (line, row) in &rows {
        let len = row.chars().count();
        if len != width as usize {
            return Err(SpriteError::Definition {
                message: format!(
                    "{} (line {}): row is {} wide, size says {}",
                    name, line, len, width
                ),
                help: Some("Every row must be exactly as wide as the sprite".to_string()),
            });
        }
    }

    let sprite_body = match doc.get_frontmatter_str("paint") {
        None => pixel_body(doc, &rows, &palette)?,
        Some("silhouette") => silhouette_body(doc, &rows, &palette)?,
        Some(other) => {
            return Err(doc_error(
                doc,
                format!("unknown paint mode '{}', expected silhouette", other),
            ))
        }
    };

    Ok(SpriteDef {
        name,
        size: Some((width, height)),
        palette,
        body: sprite_body,
        line: doc.line(),
    })
}

fn pixel_body(doc: &RawDocument, rows: &[(u32, &str)], palette: &Palette) -> Result<SpriteBody> {
    let mut legend = BTreeMap::new();
    if let Some(entries) = &doc.legend {
        for (&glyph, value) in entries {
            let entry = match &value.value {
                LegendValue::Role(role) => {
                    if !palette.contains(role) {
                        return Err(SpriteError::Definition {
                            message: format!(
                                "{} (line {}): legend '{}' uses undefined palette role '{}'",
                                doc.name.value,
                                value.line(),
                                glyph,
                                role
                            ),
                            help: Some(format!(
                                "Palette '{}' defines: {}",
                                palette.name,
                                palette.role_names().collect::<Vec<_>>().join(", ")
                            )),
                        });
                    }
                    LegendEntry::Role(role.clone())
                }
                LegendValue::Hex(hex) => LegendEntry::Literal(Colour::from_hex(hex)?),
            };
            legend.insert(glyph, entry);
        }
    }

    let mut grid = Vec::with_capacity(rows.len());
    for (line, row) in rows {
        let cells: Vec<char> = row.chars().collect();
        if let Some(glyph) = cells
            .iter()
            .find(|&&g| g != TRANSPARENT_GLYPH && !legend.contains_key(&g))
        {
            return Err(SpriteError::Definition {
                message: format!(
                    "{} (line {}): glyph '{}' is not in the legend",
                    doc.name.value, line, glyph
                ),
                help: Some(format!("Add a legend line such as {}: $role", glyph)),
            });
        }
        grid.push(cells);
    }

    Ok(SpriteBody::Pixels { grid, legend })
}

fn silhouette_body(doc: &RawDocument, rows: &[(u32, &str)], palette: &Palette) -> Result<SpriteBody> {
    for role in SILHOUETTE_ROLES {
        if !palette.contains(role) {
            return Err(doc_error(
                doc,
                format!("silhouette palette needs a '{}' role", role),
            ));
        }
    }

    let allowed: BTreeSet<char> = [SILHOUETTE_GLYPH, TRANSPARENT_GLYPH].into_iter().collect();
    for (line, row) in rows {
        if let Some(glyph) = row.chars().find(|g| !allowed.contains(g)) {
            return Err(SpriteError::Definition {
                message: format!(
                    "{} (line {}): silhouette cells must be 'x' or '.', found '{}'",
                    doc.name.value, line, glyph
                ),
                help: None,
            });
        }
    }

    let rim = match doc.get_frontmatter_str("rim") {
        Some(side) => RimSide::parse(side)?,
        None => RimSide::default(),
    };

    let texts: Vec<&str> = rows.iter().map(|(_, row)| *row).collect();
    let mask = Mask::from_rows(&texts, SILHOUETTE_GLYPH)?;

    Ok(SpriteBody::Silhouette { mask, rim })
}
