use clap::Parser;
use miette::Result;
use spritegen::cli::{Cli, Commands};
use spritegen::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => spritegen::cli::build::run(args, &printer)?,
        Commands::List(args) => spritegen::cli::list::run(args, &printer)?,
        Commands::Validate(args) => spritegen::cli::validate::run(args, &printer)?,
        Commands::Verify(args) => spritegen::cli::verify::run(args, &printer)?,
        Commands::Completions(args) => spritegen::cli::completions::run(args)?,
    }

    Ok(())
}
