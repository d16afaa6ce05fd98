use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

use cartomancer::validator::{ValidationReport, Validator};

/// Validate a deck directory and print the report.
///
/// Fails when the deck has validation errors.
pub fn run(out: &mut dyn Write, deck_path: &Path, json: bool) -> Result<()> {
    if !deck_path.exists() {
        bail!("deck directory not found: {}", deck_path.display());
    }

    let report = Validator::new(deck_path)
        .validate()
        .with_context(|| format!("validation error for {}", deck_path.display()))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        print_report(out, deck_path, &report)?;
    }

    if !report.is_valid() {
        bail!("validation failed with {} errors", report.errors.len());
    }
    Ok(())
}

fn print_report(out: &mut dyn Write, deck_path: &Path, report: &ValidationReport) -> Result<()> {
    writeln!(out, "Validation Results:")?;
    writeln!(out, "-------------------")?;

    if report.is_valid() {
        writeln!(
            out,
            "✅ Deck '{}' is valid according to the specification.",
            deck_path.display()
        )?;
    } else {
        writeln!(
            out,
            "❌ Deck '{}' has {} validation errors:",
            deck_path.display(),
            report.errors.len()
        )?;
        for (i, error) in report.errors.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, error)?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(out, "\nWarnings:")?;
        for (i, warning) in report.warnings.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, warning)?;
        }
    }
    Ok(())
}
