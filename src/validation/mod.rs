//! Validation of the asset catalog and of built output.
//!
//! `validate_catalog` runs the consistency checks used by
//! `spritegen validate`; `verify_outputs` re-reads the PNGs a build wrote
//! for `spritegen verify`.

mod checks;
mod verify;
mod warning;

pub use checks::KNOWN_SIZES;
pub use verify::{verify_outputs, FileCheck, FileStatus, VerifyReport};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::catalog::Catalog;
use crate::output::{plural, Printer};

/// Run all validation checks against the catalog.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_mirrors(catalog));
    result.merge(checks::check_unused_legends(catalog));
    result.merge(checks::check_unused_palette_roles(catalog));
    result.merge(checks::check_sizes(catalog));

    result
}

/// Print diagnostics to stderr, followed by a one-line summary.
pub fn print_diagnostics(printer: &Printer, result: &ValidationResult) {
    for d in result.iter() {
        eprintln!(
            "{}{}: {}",
            printer.severity(&d.severity.to_string(), d.is_error()),
            printer.dim(&format!("[{}]", d.code)),
            d.subject
        );
        eprintln!("  {}", d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.cyan("help:"), help);
        }
    }

    if result.has_errors() {
        printer.error("Failed", &summary(result));
    } else if result.has_warnings() {
        printer.warning("Passed", &summary(result));
    } else {
        printer.success("Passed", "no problems found");
    }
}

/// Error and warning tally, e.g. "1 error, 2 warnings".
pub fn summary(result: &ValidationResult) -> String {
    format!(
        "{}, {}",
        plural(result.error_count(), "error", "errors"),
        plural(result.warning_count(), "warning", "warnings")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AssetGroup;
    use crate::parser::parse_sprite_file;

    #[test]
    fn test_builtin_catalog_has_no_errors() {
        let result = validate_catalog(&Catalog::builtin().unwrap());

        let errors: Vec<String> = result
            .iter()
            .filter(|d| d.is_error())
            .map(|d| d.to_string())
            .collect();
        assert!(errors.is_empty(), "{:#?}", errors);
    }

    #[test]
    fn test_validate_catches_missing_mirror() {
        let file = parse_sprite_file("---\nname: walk_right\nmirror: walk_left\n---\n").unwrap();
        let catalog = Catalog::from_files(vec![(AssetGroup::Player, file)]).unwrap();

        let result = validate_catalog(&catalog);
        assert!(result.has_errors());
        insta::assert_snapshot!(summary(&result), @"1 error, 0 warnings");
    }

    #[test]
    fn test_summary() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::warning("spritegen::validate::off-size", "ui/a", "odd"));
        result.push(Diagnostic::warning("spritegen::validate::off-size", "ui/b", "odd"));

        insta::assert_snapshot!(summary(&result), @"0 errors, 2 warnings");
    }
}
