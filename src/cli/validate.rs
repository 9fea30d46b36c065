use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::{Result, SpriteError};
use crate::output::{plural, Printer};
use crate::validation::{print_diagnostics, summary, validate_catalog};

/// Check the asset definitions without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to spritegen.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(args.config.as_deref())?;
    let catalog = config.catalog()?;

    printer.status(
        "Checking",
        &plural(catalog.len(), "asset", "assets"),
    );

    let result = validate_catalog(&catalog);
    print_diagnostics(printer, &result);

    if result.has_errors() {
        return Err(SpriteError::Build {
            message: format!("validation failed: {}", summary(&result)),
            help: None,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run_with_art(art: &str) -> Result<()> {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("art")).unwrap();
        fs::write(dir.path().join("art/player.sprite.md"), art).unwrap();
        let config = dir.path().join("spritegen.yaml");
        fs::write(&config, "art_dir: art\n").unwrap();

        run(
            ValidateArgs {
                config: Some(config),
            },
            &Printer::plain(),
        )
    }

    #[test]
    fn test_validate_passes_with_warnings_only() {
        let art = "---\nname: odd\nsize: 3x3\n---\n\n```px\n...\n...\n...\n```\n";
        assert!(run_with_art(art).is_ok());
    }

    #[test]
    fn test_validate_fails_on_errors() {
        let err = run_with_art("---\nname: walk_right\nmirror: walk_left\n---\n").unwrap_err();
        assert!(err.to_string().contains("1 error"));
    }
}
