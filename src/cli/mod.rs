pub mod build;
pub mod completions;
pub mod list;
pub mod validate;
pub mod verify;

use clap::{Parser, Subcommand};

/// spritegen - Pixel-art asset generator for a 2D RPG
#[derive(Parser, Debug)]
#[command(name = "spritegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate sprite, tile and UI PNGs
    Build(build::BuildArgs),

    /// List every asset the build produces
    List(list::ListArgs),

    /// Check the asset definitions without rendering
    Validate(validate::ValidateArgs),

    /// Check that a build's PNG files exist and are correctly sized
    Verify(verify::VerifyArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
