//! Overlap command implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde_json::json;

use qcompress_model::SwapTestOutcome;

use super::common::OutputFormat;

/// Estimate from a JSON counts file.
pub fn execute_counts(path: &Path, bit: usize, format: OutputFormat) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let counts: BTreeMap<String, u64> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid counts JSON in {}", path.display()))?;

    let outcome = SwapTestOutcome::from_counts(&counts, bit)?;
    print_outcome(&outcome, format)
}

/// Estimate from a tally of ones.
pub fn execute_tally(ones: u64, shots: u64, format: OutputFormat) -> Result<()> {
    let outcome = SwapTestOutcome::new(ones, shots)?;
    print_outcome(&outcome, format)
}

fn print_outcome(outcome: &SwapTestOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "ones": outcome.ones(),
                "shots": outcome.shots(),
                "probability_one": outcome.probability_one(),
                "overlap": outcome.overlap(),
                "standard_error": outcome.standard_error(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            println!(
                "{} Swap test: {} of {} shots measured 1",
                style("→").cyan().bold(),
                outcome.ones(),
                outcome.shots()
            );
            println!("  P(1):    {:.4}", outcome.probability_one());
            println!(
                "  Overlap: {} ± {:.4}",
                style(format!("{:.4}", outcome.overlap())).yellow().bold(),
                outcome.standard_error()
            );
        }
    }
    Ok(())
}
