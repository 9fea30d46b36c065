//! Validation checks for the asset catalog.
//!
//! Each check takes a `&Catalog` and returns a `ValidationResult`.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Asset, AssetGroup, Catalog};
use crate::types::{Palette, SpriteBody};

use super::warning::{Diagnostic, ValidationResult};

/// Sizes the game's sprite sheets are laid out for.
pub const KNOWN_SIZES: [(u32, u32); 6] = [(16, 24), (16, 16), (8, 8), (12, 12), (16, 8), (24, 32)];

fn subject(asset: &Asset) -> String {
    format!("{}/{}", asset.group, asset.name)
}

/// Check that every mirror points at a plain sprite of the same size in
/// its own group.
pub fn check_mirrors(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    for asset in catalog.assets() {
        let Some(source_name) = asset.descriptor().and_then(|d| d.mirror_source()) else {
            continue;
        };

        let Some(source) = catalog
            .get(asset.group, source_name)
            .filter(|s| s.descriptor().is_some())
        else {
            result.push(
                Diagnostic::error(
                    "spritegen::validate::missing-mirror-source",
                    subject(asset),
                    format!("mirrors '{}', which is not defined", source_name),
                )
                .with_help(format!(
                    "Define '{}' in the {} group or fix the mirror: field",
                    source_name, asset.group
                )),
            );
            continue;
        };

        if source.descriptor().is_some_and(|d| d.is_mirror()) {
            result.push(
                Diagnostic::error(
                    "spritegen::validate::mirror-of-mirror",
                    subject(asset),
                    format!("mirrors '{}', which is itself a mirror", source_name),
                )
                .with_help("Point the mirror at the original sprite"),
            );
            continue;
        }

        if let (Some(declared), Some(actual)) = (asset.size, source.size) {
            if declared != actual {
                result.push(
                    Diagnostic::error(
                        "spritegen::validate::mirror-size",
                        subject(asset),
                        format!(
                            "declares {}x{} but '{}' is {}x{}",
                            declared.0, declared.1, source_name, actual.0, actual.1
                        ),
                    )
                    .with_help("Drop the size: field; mirrors take their source's size"),
                );
            }
        }
    }

    result
}

/// Check for legend glyphs that never appear in the grid.
pub fn check_unused_legends(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    for asset in catalog.assets() {
        let Some(def) = asset.descriptor() else {
            continue;
        };
        let SpriteBody::Pixels { legend, .. } = &def.body else {
            continue;
        };

        let used = def.used_glyphs();
        for (glyph, entry) in legend {
            if !used.contains(glyph) {
                result.push(
                    Diagnostic::warning(
                        "spritegen::validate::unused-legend",
                        subject(asset),
                        format!("legend glyph '{}' ({}) is never used", glyph, entry),
                    )
                    .with_help("Remove the entry or use the glyph in the grid"),
                );
            }
        }
    }

    result
}

/// Check for palette roles no sprite paints with.
///
/// A named palette is shared by the sprites of its file, so a role counts
/// as used if any sprite of the group that uses that palette paints with it.
pub fn check_unused_palette_roles(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut palettes: BTreeMap<(AssetGroup, &str), (&Palette, &Asset, BTreeSet<String>)> =
        BTreeMap::new();

    for asset in catalog.assets() {
        let Some(def) = asset.descriptor() else {
            continue;
        };
        if def.is_mirror() {
            continue;
        }
        let entry = palettes
            .entry((asset.group, def.palette.name.as_str()))
            .or_insert_with(|| (&def.palette, asset, BTreeSet::new()));
        entry.2.extend(def.used_roles());
    }

    for ((_, palette_name), (palette, first_user, used)) in palettes {
        for role in palette.role_names() {
            if !used.contains(role) {
                result.push(
                    Diagnostic::warning(
                        "spritegen::validate::unused-palette-role",
                        subject(first_user),
                        format!("palette '{}' defines ${} but nothing paints with it", palette_name, role),
                    )
                    .with_help("Remove the role from the palette"),
                );
            }
        }
    }

    result
}

/// Check for assets outside the known size classes.
pub fn check_sizes(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    for asset in catalog.assets() {
        let Some((w, h)) = asset.size else {
            continue;
        };
        if !KNOWN_SIZES.contains(&(w, h)) {
            let known: Vec<String> = KNOWN_SIZES
                .iter()
                .map(|(w, h)| format!("{}x{}", w, h))
                .collect();
            result.push(
                Diagnostic::warning(
                    "spritegen::validate::off-size",
                    subject(asset),
                    format!("size {}x{} is not a standard sprite size", w, h),
                )
                .with_help(format!("Standard sizes: {}", known.join(", "))),
            );
        }
    }

    result
}
