//! Project configuration (spritegen.yaml) parsing.
//!
//! Every field is optional; command-line flags override what is set here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{AssetGroup, Catalog, Layout};
use crate::error::{Result, SpriteError};

/// The name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "spritegen.yaml";

/// Largest integer upscale a build accepts.
pub const MAX_SCALE: u32 = 64;

/// Build configuration loaded from spritegen.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base output directory.
    pub output: PathBuf,

    /// Integer upscale applied to every PNG.
    pub scale: u32,

    /// Build-wide seed for the procedural assets.
    pub seed: Option<u64>,

    /// Load descriptors from this directory instead of the embedded set.
    pub art_dir: Option<PathBuf>,

    /// Per-group output directories, relative to `output`.
    pub groups: BTreeMap<AssetGroup, PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            scale: 1,
            seed: None,
            art_dir: None,
            groups: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpriteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        let mut config = Self::parse(&content)?;
        config.resolve_relative_to(path.parent().unwrap_or(Path::new(".")));
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SpriteError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `path` if given, otherwise `spritegen.yaml` in the working
    /// directory if it exists, otherwise the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(CONFIG_FILENAME);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The art directory is relative to the config file, not the
    /// working directory.
    fn resolve_relative_to(&mut self, base: &Path) {
        if let Some(art_dir) = &self.art_dir {
            if art_dir.is_relative() {
                self.art_dir = Some(base.join(art_dir));
            }
        }
    }

    /// Output directories for a build.
    pub fn layout(&self) -> Layout {
        Layout {
            output: self.output.clone(),
            groups: self.groups.clone(),
        }
    }

    /// The catalog this configuration builds.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.art_dir {
            Some(dir) => Catalog::load(dir),
            None => Catalog::builtin(),
        }
    }

    /// The scale factor to build with; `0` means `1`.
    pub fn effective_scale(&self) -> Result<u32> {
        if self.scale > MAX_SCALE {
            return Err(SpriteError::Build {
                message: format!("scale {} is larger than the maximum of {}", self.scale, MAX_SCALE),
                help: Some(format!("Set scale to between 1 and {}", MAX_SCALE)),
            });
        }
        Ok(self.scale.max(1))
    }
}
