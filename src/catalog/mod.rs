//! The full named asset set.
//!
//! A catalog joins the descriptor sprites (embedded at compile time or
//! loaded from an art directory) with the procedural generators, assigns
//! every asset to a group, and knows where each one is written.
//!
//! # Example
//!
//! ```ignore
//! use spritegen::catalog::{Catalog, Layout};
//!
//! let catalog = Catalog::builtin()?;
//! let layout = Layout::new("dist");
//!
//! for asset in catalog.assets() {
//!     let canvas = catalog.render(asset, None)?;
//!     println!("{} -> {}", asset.name, catalog.output_path(asset, &layout).display());
//! }
//! ```

mod loader;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assets::{Generator, PROCEDURAL};
use crate::error::{Result, SpriteError};
use crate::parser::SpriteFile;
use crate::render::mirror_horizontal;
use crate::types::{Canvas, SpriteBody, SpriteDef};

pub use loader::{group_for_path, scan_art_dir, SPRITE_EXTENSION};

/// The output groups assets are sorted into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetGroup {
    Player,
    Tiles,
    Npcs,
    Enemies,
    Collectibles,
    Ui,
}

impl AssetGroup {
    pub const ALL: [AssetGroup; 6] = [
        AssetGroup::Player,
        AssetGroup::Tiles,
        AssetGroup::Npcs,
        AssetGroup::Enemies,
        AssetGroup::Collectibles,
        AssetGroup::Ui,
    ];

    /// Get the short name for this group.
    pub fn name(&self) -> &'static str {
        match self {
            AssetGroup::Player => "player",
            AssetGroup::Tiles => "tiles",
            AssetGroup::Npcs => "npcs",
            AssetGroup::Enemies => "enemies",
            AssetGroup::Collectibles => "collectibles",
            AssetGroup::Ui => "ui",
        }
    }

    /// Output directory relative to the base output directory.
    pub fn default_dir(&self) -> PathBuf {
        Path::new("sprites").join(self.name())
    }
}

impl fmt::Display for AssetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AssetGroup {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self> {
        AssetGroup::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| SpriteError::Definition {
                message: format!("unknown asset group '{}'", s),
                help: Some(format!(
                    "Groups are: {}",
                    AssetGroup::ALL.map(|g| g.name()).join(", ")
                )),
            })
    }
}

/// Where an asset's pixels come from.
#[derive(Debug, Clone)]
pub enum AssetSource {
    Descriptor(SpriteDef),
    Procedural {
        generate: Generator,
        /// Default seed, `None` when the generator is not random.
        seed: Option<u64>,
    },
}

/// One output file of the build.
#[derive(Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub group: AssetGroup,
    /// `None` only for a mirror whose source is missing.
    pub size: Option<(u32, u32)>,
    pub source: AssetSource,
}

impl Asset {
    /// The descriptor, for descriptor-backed assets.
    pub fn descriptor(&self) -> Option<&SpriteDef> {
        match &self.source {
            AssetSource::Descriptor(def) => Some(def),
            AssetSource::Procedural { .. } => None,
        }
    }

    /// Short label for the kind of source.
    pub fn kind(&self) -> &'static str {
        match &self.source {
            AssetSource::Descriptor(def) => match def.body {
                SpriteBody::Pixels { .. } => "pixels",
                SpriteBody::Silhouette { .. } => "silhouette",
                SpriteBody::Mirror { .. } => "mirror",
            },
            AssetSource::Procedural { .. } => "procedural",
        }
    }

    /// Default seed of a random procedural asset.
    pub fn default_seed(&self) -> Option<u64> {
        match self.source {
            AssetSource::Procedural { seed, .. } => seed,
            AssetSource::Descriptor(_) => None,
        }
    }

    /// Seed the generator actually runs with.
    ///
    /// A build-wide seed replaces every default seed with one derived from
    /// the asset name, so two assets never share a noise stream.
    pub fn effective_seed(&self, seed_override: Option<u64>) -> Option<u64> {
        let default = self.default_seed()?;
        Some(seed_override.map_or(default, |seed| derive_seed(seed, &self.name)))
    }
}

/// Output directories for a build.
#[derive(Debug, Clone)]
pub struct Layout {
    pub output: PathBuf,
    /// Per-group directory overrides, relative to `output`.
    pub groups: BTreeMap<AssetGroup, PathBuf>,
}

impl Layout {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            groups: BTreeMap::new(),
        }
    }

    /// Directory a group is written to.
    pub fn dir(&self, group: AssetGroup) -> PathBuf {
        let relative = self
            .groups
            .get(&group)
            .cloned()
            .unwrap_or_else(|| group.default_dir());
        self.output.join(relative)
    }
}

/// The complete asset set.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    assets: Vec<Asset>,
}

impl Catalog {
    /// The embedded descriptors plus every procedural generator.
    pub fn builtin() -> Result<Self> {
        Self::from_files(loader::load_embedded()?)
    }

    /// Descriptors found under `art_dir` plus every procedural generator.
    pub fn load(art_dir: &Path) -> Result<Self> {
        Self::from_files(loader::load_dir(art_dir)?)
    }

    /// Build a catalog from parsed descriptor files.
    ///
    /// Fails if any group defines the same output name twice.
    pub fn from_files(files: Vec<(AssetGroup, SpriteFile)>) -> Result<Self> {
        let mut assets = Vec::new();

        for (group, file) in files {
            for def in file.sprites {
                assets.push(Asset {
                    name: def.name.clone(),
                    group,
                    size: def.size,
                    source: AssetSource::Descriptor(def),
                });
            }
        }

        for p in PROCEDURAL {
            assets.push(Asset {
                name: p.name.to_string(),
                group: p.group,
                size: Some(p.size),
                source: AssetSource::Procedural {
                    generate: p.generate,
                    seed: p.seed,
                },
            });
        }

        check_duplicates(&assets)?;
        resolve_mirror_sizes(&mut assets);

        Ok(Self { assets })
    }

    /// All assets, descriptors first, in file order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Find an asset by group and name.
    pub fn get(&self, group: AssetGroup, name: &str) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|a| a.group == group && a.name == name)
    }

    /// Select assets by group and name. Empty filters select everything.
    ///
    /// Fails if a requested name matches nothing in the selected groups.
    pub fn filter(&self, groups: &[AssetGroup], names: &[String]) -> Result<Vec<&Asset>> {
        let in_groups = |a: &&Asset| groups.is_empty() || groups.contains(&a.group);

        let unknown: Vec<&str> = names
            .iter()
            .filter(|n| !self.assets.iter().filter(in_groups).any(|a| &a.name == *n))
            .map(|n| n.as_str())
            .collect();
        if !unknown.is_empty() {
            return Err(SpriteError::Build {
                message: format!("Unknown asset(s): {}", unknown.join(", ")),
                help: Some("Run `spritegen list` to see every asset".to_string()),
            });
        }

        Ok(self
            .assets
            .iter()
            .filter(in_groups)
            .filter(|a| names.is_empty() || names.contains(&a.name))
            .collect())
    }

    /// Paint one asset.
    ///
    /// Mirrors are rendered by flipping their source, which must be a
    /// non-mirror sprite in the same group. `seed_override` re-seeds random
    /// generators (see [`Asset::effective_seed`]).
    pub fn render(&self, asset: &Asset, seed_override: Option<u64>) -> Result<Canvas> {
        match &asset.source {
            AssetSource::Procedural { generate, .. } => {
                generate(asset.effective_seed(seed_override).unwrap_or(0))
            }
            AssetSource::Descriptor(def) => match def.mirror_source() {
                None => def.render(),
                Some(source) => {
                    let source_def = self.mirror_source_of(asset, source)?;
                    let flipped = mirror_horizontal(&source_def.render()?);
                    match def.size {
                        Some((w, h)) if (w, h) != (flipped.width(), flipped.height()) => {
                            Err(SpriteError::Definition {
                                message: format!(
                                    "{}/{}: declares {}x{} but '{}' is {}x{}",
                                    asset.group,
                                    asset.name,
                                    w,
                                    h,
                                    source,
                                    flipped.width(),
                                    flipped.height()
                                ),
                                help: Some(
                                    "Drop the size: field; mirrors take their source's size"
                                        .to_string(),
                                ),
                            })
                        }
                        _ => Ok(flipped),
                    }
                }
            },
        }
    }

    /// Where an asset is written within `layout`.
    pub fn output_path(&self, asset: &Asset, layout: &Layout) -> PathBuf {
        layout.dir(asset.group).join(format!("{}.png", asset.name))
    }

    fn mirror_source_of<'a>(&'a self, asset: &Asset, source: &str) -> Result<&'a SpriteDef> {
        let context = |message: String, help: Option<String>| SpriteError::Definition {
            message: format!("{}/{}: {}", asset.group, asset.name, message),
            help,
        };

        let def = self
            .get(asset.group, source)
            .and_then(Asset::descriptor)
            .ok_or_else(|| {
                context(
                    format!("mirror source '{}' is not defined", source),
                    Some(format!(
                        "Define '{}' in the {} group or fix the mirror: field",
                        source, asset.group
                    )),
                )
            })?;

        if def.is_mirror() {
            return Err(context(
                format!("mirror source '{}' is itself a mirror", source),
                Some("Point the mirror at the original sprite".to_string()),
            ));
        }

        Ok(def)
    }
}

/// Mix a build-wide seed with an asset name (64-bit FNV-1a).
pub fn derive_seed(seed: u64, name: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    seed.to_le_bytes()
        .iter()
        .chain(name.as_bytes())
        .fold(OFFSET, |hash, &byte| (hash ^ byte as u64).wrapping_mul(PRIME))
}

fn check_duplicates(assets: &[Asset]) -> Result<()> {
    let mut seen = HashSet::new();
    let duplicates: Vec<String> = assets
        .iter()
        .filter(|a| !seen.insert((a.group, a.name.as_str())))
        .map(|a| format!("{}/{}", a.group, a.name))
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(SpriteError::Definition {
            message: format!("asset defined more than once: {}", duplicates.join(", ")),
            help: Some("Each output file must have exactly one definition".to_string()),
        })
    }
}

fn resolve_mirror_sizes(assets: &mut [Asset]) {
    let sizes: HashMap<(AssetGroup, String), (u32, u32)> = assets
        .iter()
        .filter_map(|a| Some(((a.group, a.name.clone()), a.size?)))
        .collect();

    for asset in assets.iter_mut() {
        if asset.size.is_some() {
            continue;
        }
        let source = asset
            .descriptor()
            .and_then(SpriteDef::mirror_source)
            .map(str::to_string);
        if let Some(source) = source {
            asset.size = sizes.get(&(asset.group, source)).copied();
        }
    }
}
