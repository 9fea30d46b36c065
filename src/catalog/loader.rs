//! Descriptor loading, from the embedded art set or an art directory.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SpriteError};
use crate::parser::{parse_sprite_file, SpriteFile};

use super::AssetGroup;

/// File suffix of a sprite descriptor file.
pub const SPRITE_EXTENSION: &str = ".sprite.md";

/// The art directory shipped with the crate, one file per group.
const EMBEDDED: [(AssetGroup, &str, &str); 6] = [
    (
        AssetGroup::Player,
        "player.sprite.md",
        include_str!("../../art/player.sprite.md"),
    ),
    (
        AssetGroup::Tiles,
        "tiles.sprite.md",
        include_str!("../../art/tiles.sprite.md"),
    ),
    (
        AssetGroup::Npcs,
        "npcs.sprite.md",
        include_str!("../../art/npcs.sprite.md"),
    ),
    (
        AssetGroup::Enemies,
        "enemies.sprite.md",
        include_str!("../../art/enemies.sprite.md"),
    ),
    (
        AssetGroup::Collectibles,
        "collectibles.sprite.md",
        include_str!("../../art/collectibles.sprite.md"),
    ),
    (
        AssetGroup::Ui,
        "ui.sprite.md",
        include_str!("../../art/ui.sprite.md"),
    ),
];

/// Parse the embedded descriptor files.
pub(super) fn load_embedded() -> Result<Vec<(AssetGroup, SpriteFile)>> {
    EMBEDDED
        .iter()
        .map(|&(group, filename, source)| {
            parse_sprite_file(source)
                .map(|file| (group, file))
                .map_err(|e| SpriteError::Build {
                    message: format!("{}: {}", filename, e),
                    help: None,
                })
        })
        .collect()
}

/// Parse every descriptor file under `root`.
///
/// All files are attempted; failures are reported together.
pub(super) fn load_dir(root: &Path) -> Result<Vec<(AssetGroup, SpriteFile)>> {
    if !root.is_dir() {
        return Err(SpriteError::Io {
            path: root.to_path_buf(),
            message: "art directory does not exist".to_string(),
        });
    }

    let mut files = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for path in scan_art_dir(root) {
        match load_file(&path) {
            Ok(loaded) => files.push(loaded),
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    if !errors.is_empty() {
        return Err(SpriteError::Build {
            message: format!(
                "Failed to load {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ),
            help: Some("Fix the errors above and try again".to_string()),
        });
    }

    Ok(files)
}

fn load_file(path: &Path) -> Result<(AssetGroup, SpriteFile)> {
    let group = group_for_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| SpriteError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok((group, parse_sprite_file(&content)?))
}

/// Find descriptor files below `root`, sorted by path.
pub fn scan_art_dir(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_sprite_file(p))
        .collect();

    paths.sort();
    paths
}

fn is_sprite_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SPRITE_EXTENSION))
}

/// The group a descriptor file belongs to.
///
/// `tiles.sprite.md` belongs to `tiles`. A file with any other stem takes
/// the name of its directory, so `art/npcs/teachers.sprite.md` belongs to
/// `npcs`.
pub fn group_for_path(path: &Path) -> Result<AssetGroup> {
    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(SPRITE_EXTENSION));

    if let Some(group) = stem.and_then(|s| s.parse().ok()) {
        return Ok(group);
    }

    let parent = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str());

    match parent.map(str::parse::<AssetGroup>) {
        Some(Ok(group)) => Ok(group),
        _ => Err(SpriteError::Definition {
            message: format!("cannot tell which group {} belongs to", path.display()),
            help: Some(format!(
                "Name the file <group>{} or put it in a <group>/ directory",
                SPRITE_EXTENSION
            )),
        }),
    }
}
