//! Build command implementation.
//!
//! Renders the selected assets and writes one PNG per asset into the
//! group directories of the output layout.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{RecursiveMode, Watcher};

use crate::catalog::{AssetGroup, SPRITE_EXTENSION};
use crate::config::Config;
use crate::error::{Result, SpriteError};
use crate::output::{dims, display_path, plural, Printer};
use crate::render::write_png;

/// Quiet period after a change before rebuilding.
const WATCH_SETTLE: Duration = Duration::from_millis(150);

/// Generate sprite, tile and UI PNGs
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Assets to build (default: all)
    pub names: Vec<String>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only build this group (repeatable)
    #[arg(long = "group", short, value_enum)]
    pub groups: Vec<AssetGroup>,

    /// Scale factor for output (integer upscaling)
    #[arg(long)]
    pub scale: Option<u32>,

    /// Re-seed every procedural asset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to spritegen.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rebuild whenever a descriptor file in art_dir changes
    #[arg(long)]
    pub watch: bool,
}

impl BuildArgs {
    /// The project configuration with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::discover(self.config.as_deref())?;
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let config = args.resolve_config()?;

    let written = build(&config, &args.groups, &args.names, printer)?;
    report(&config, written.len(), printer);

    if args.watch {
        watch(&config, &args, printer)?;
    }

    Ok(())
}

/// Render the selected assets and write them out.
///
/// Empty `groups` and `names` select everything. Returns the written paths
/// in catalog order.
pub fn build(
    config: &Config,
    groups: &[AssetGroup],
    names: &[String],
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    let catalog = config.catalog()?;
    let layout = config.layout();
    let scale = config.effective_scale()?;
    let selected = catalog.filter(groups, names)?;

    let used_groups: BTreeSet<AssetGroup> = selected.iter().map(|a| a.group).collect();
    for group in used_groups {
        let dir = layout.dir(group);
        fs::create_dir_all(&dir).map_err(|e| SpriteError::Io {
            path: dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let mut written = Vec::with_capacity(selected.len());
    for asset in selected {
        let canvas = catalog.render(asset, config.seed)?;
        let path = catalog.output_path(asset, &layout);
        write_png(&canvas, &path, scale)?;

        printer.status(
            "Generating",
            &format!(
                "{}/{} {}",
                asset.group,
                asset.name,
                printer.dim(&format!("({})", dims(canvas.size())))
            ),
        );
        written.push(path);
    }

    Ok(written)
}

fn report(config: &Config, count: usize, printer: &Printer) {
    printer.success(
        "Finished",
        &format!(
            "{} in {}",
            plural(count, "file", "files"),
            printer.cyan(&display_path(&config.output))
        ),
    );
}

fn watch(config: &Config, args: &BuildArgs, printer: &Printer) -> Result<()> {
    let art_dir = config.art_dir.clone().ok_or_else(|| SpriteError::Build {
        message: "--watch needs descriptor files on disk".to_string(),
        help: Some("Set art_dir in spritegen.yaml".to_string()),
    })?;

    let watch_error = |e: notify::Error| SpriteError::Build {
        message: format!("Failed to watch {}: {}", art_dir.display(), e),
        help: None,
    };

    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;
    watcher
        .watch(&art_dir, RecursiveMode::Recursive)
        .map_err(watch_error)?;

    printer.info("Watching", &printer.cyan(&display_path(&art_dir)));

    while let Ok(event) = rx.recv() {
        match event {
            Ok(event) if touches_descriptor(&event) => {
                std::thread::sleep(WATCH_SETTLE);
                while rx.try_recv().is_ok() {}

                match build(config, &args.groups, &args.names, printer) {
                    Ok(written) => report(config, written.len(), printer),
                    Err(e) => printer.error("Failed", &e.to_string()),
                }
            }
            Ok(_) => {}
            Err(e) => printer.warning("Watch", &e.to_string()),
        }
    }

    Ok(())
}

fn touches_descriptor(event: &notify::Event) -> bool {
    !event.kind.is_access() && event.paths.iter().any(|p| is_descriptor(p))
}

fn is_descriptor(path: &Path) -> bool {
    path.to_str().is_some_and(|p| p.ends_with(SPRITE_EXTENSION))
}
