//! List command implementation.
//!
//! Prints the asset inventory, grouped, or as JSON on stdout.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::catalog::{Asset, AssetGroup, Catalog};
use crate::config::Config;
use crate::error::{Result, SpriteError};
use crate::output::{dims, plural, Printer};

/// List every asset the build produces
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list this group (repeatable)
    #[arg(long = "group", short, value_enum)]
    pub groups: Vec<AssetGroup>,

    /// Print machine-readable JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Path to spritegen.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// One row of the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub group: AssetGroup,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub source: &'static str,
    /// Seed the build would use, for random procedural assets.
    pub seed: Option<u64>,
}

impl ListEntry {
    fn new(asset: &Asset, seed_override: Option<u64>) -> Self {
        Self {
            name: asset.name.clone(),
            group: asset.group,
            width: asset.size.map(|(w, _)| w),
            height: asset.size.map(|(_, h)| h),
            source: asset.kind(),
            seed: asset.effective_seed(seed_override),
        }
    }
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(args.config.as_deref())?;
    let catalog = config.catalog()?;
    let entries = entries(&catalog, &args.groups, config.seed)?;

    if args.json {
        let json = serde_json::to_string_pretty(&entries).map_err(|e| SpriteError::Build {
            message: format!("Failed to serialize asset list: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        print_inventory(&entries, printer);
    }

    Ok(())
}

/// Inventory rows for the selected groups, in catalog order.
pub fn entries(
    catalog: &Catalog,
    groups: &[AssetGroup],
    seed_override: Option<u64>,
) -> Result<Vec<ListEntry>> {
    Ok(catalog
        .filter(groups, &[])?
        .into_iter()
        .map(|asset| ListEntry::new(asset, seed_override))
        .collect())
}

fn print_inventory(entries: &[ListEntry], printer: &Printer) {
    for group in AssetGroup::ALL {
        let rows: Vec<&ListEntry> = entries.iter().filter(|e| e.group == group).collect();
        if rows.is_empty() {
            continue;
        }

        printer.info(group.name(), &printer.bold(&plural(rows.len(), "asset", "assets")));
        for row in rows {
            let size = match (row.width, row.height) {
                (Some(w), Some(h)) => dims((w, h)),
                _ => "?".to_string(),
            };
            let seed = row
                .seed
                .map(|s| format!(" seed {}", s))
                .unwrap_or_default();
            eprintln!(
                "{:>12} {} {}",
                "",
                row.name,
                printer.dim(&format!("{} {}{}", size, row.source, seed))
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_for_group() {
        let catalog = Catalog::builtin().unwrap();
        let tiles = entries(&catalog, &[AssetGroup::Tiles], None).unwrap();

        let tree = tiles.iter().find(|e| e.name == "tree").unwrap();
        assert_eq!(
            *tree,
            ListEntry {
                name: "tree".to_string(),
                group: AssetGroup::Tiles,
                width: Some(16),
                height: Some(16),
                source: "procedural",
                seed: Some(111),
            }
        );
        assert!(tiles.iter().all(|e| e.group == AssetGroup::Tiles));
    }

    #[test]
    fn test_entry_json() {
        let catalog = Catalog::builtin().unwrap();
        let entries = entries(&catalog, &[AssetGroup::Tiles], None).unwrap();
        let fountain = entries.iter().find(|e| e.name == "fountain").unwrap();

        insta::assert_json_snapshot!(fountain, @r#"
        {
          "name": "fountain",
          "group": "tiles",
          "width": 16,
          "height": 16,
          "source": "procedural",
          "seed": null
        }
        "#);
    }
}
