//! Verify command implementation.
//!
//! Re-reads every PNG a build writes and reports what is missing or
//! mis-sized.

use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::{Result, SpriteError};
use crate::output::{dims, display_path, plural, Printer};
use crate::validation::{verify_outputs, FileStatus, VerifyReport};

/// Check that a build's PNG files exist and are correctly sized
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Output directory the build wrote to
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor the build used
    #[arg(long)]
    pub scale: Option<u32>,

    /// Path to spritegen.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: VerifyArgs, printer: &Printer) -> Result<()> {
    let mut config = Config::discover(args.config.as_deref())?;
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(scale) = args.scale {
        config.scale = scale;
    }

    let catalog = config.catalog()?;
    let report = verify_outputs(&catalog, &config.layout(), config.effective_scale()?)?;
    print_report(&report, printer);

    if !report.is_ok() {
        return Err(SpriteError::Build {
            message: format!(
                "{} of {} failed verification",
                report.failure_count(),
                plural(report.files.len(), "file", "files")
            ),
            help: Some("Run `spritegen build` to regenerate the output".to_string()),
        });
    }

    printer.success(
        "Verified",
        &format!(
            "{} in {}",
            plural(report.files.len(), "file", "files"),
            printer.cyan(&display_path(&config.output))
        ),
    );
    Ok(())
}

fn print_report(report: &VerifyReport, printer: &Printer) {
    for check in &report.files {
        let subject = format!("{}/{}", check.group, check.asset);
        let expected = check.expected.map(dims).unwrap_or_else(|| "?".to_string());

        match &check.status {
            FileStatus::Ok { opaque } => printer.status(
                "Ok",
                &format!(
                    "{} {}",
                    subject,
                    printer.dim(&format!("({}, {} opaque)", expected, opaque))
                ),
            ),
            FileStatus::Missing => printer.error(
                "Missing",
                &format!("{} {}", subject, printer.dim(&display_path(&check.path))),
            ),
            FileStatus::WrongSize { actual } => printer.error(
                "Wrong size",
                &format!("{} is {}, expected {}", subject, dims(*actual), expected),
            ),
            FileStatus::Unreadable(reason) => {
                printer.error("Unreadable", &format!("{}: {}", subject, reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_verify_empty_output_fails() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("spritegen.yaml");
        std::fs::write(&config, "").unwrap();

        let args = VerifyArgs {
            output: Some(dir.path().join("dist")),
            scale: None,
            config: Some(config),
        };

        let err = run(args, &Printer::plain()).unwrap_err();
        assert!(err.to_string().contains("failed verification"));
    }
}
