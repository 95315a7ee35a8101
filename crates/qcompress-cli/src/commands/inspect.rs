//! Inspect command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qcompress_model::SwapTestReport;

use super::common::{OutputFormat, load_circuit, load_config};

/// Execute the inspect command.
pub fn execute(input: &Path, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let circuit = load_circuit(input)?;
    let report =
        SwapTestReport::inspect(&circuit, &config).context("Failed to inspect circuit")?;

    match format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&report)
                .context("JSON serialization failed")?;
            value["well_formed"] = report.is_well_formed().into();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => print_report(&report),
    }

    Ok(())
}

fn check(ok: bool) -> console::StyledObject<&'static str> {
    if ok {
        style("✓").green().bold()
    } else {
        style("✗").red().bold()
    }
}

fn print_report(report: &SwapTestReport) {
    println!(
        "{} Swap-test structure of {}",
        style("→").cyan().bold(),
        style(&report.circuit).green()
    );

    println!("\n  Register pairs:");
    if report.pairs.is_empty() {
        println!("    {}", style("(none)").dim());
    }
    for pair in &report.pairs {
        println!(
            "    {} {:<16} {:>3}  ↔  {:<16} {:>3}   {} Fredkin",
            check(pair.complete),
            style(&pair.original.name).cyan(),
            pair.original.size,
            style(&pair.model.name).cyan(),
            pair.model.size,
            pair.fredkin_gates
        );
    }
    for reg in &report.unpaired_registers {
        println!(
            "    {} {:<16} {:>3}  (no model register)",
            check(false),
            style(&reg.name).cyan(),
            reg.size
        );
    }

    println!();
    match &report.ancilla {
        Some(reg) => println!("  {} Ancilla:   {reg}", check(reg.size == 1)),
        None => println!("  {} Ancilla:   missing", check(false)),
    }
    match (&report.result, report.result_clbit) {
        (Some(reg), Some(bit)) => {
            println!("  {} Result:    {reg} (clbit {bit})", check(reg.size == 1));
        }
        _ => println!("  {} Result:    missing", check(false)),
    }
    println!(
        "  {} Barriers:  {}",
        check(report.barrier_count == 1 && report.barrier_precedes_swap_test),
        report.barrier_count
    );
    println!(
        "  {} Stages:    {} of {} ({} Fredkin gates)",
        check(report.cswap_stages == report.pairs.len()),
        report.cswap_stages,
        report.pairs.len(),
        report.fredkin_gates
    );
    println!(
        "  {} Hadamards: {} on ancilla",
        check(report.ancilla_hadamards == 2),
        report.ancilla_hadamards
    );
    println!(
        "  {} Measured:  {}",
        check(report.result_measured_last),
        if report.result_measured_last { "last op on ancilla" } else { "no" }
    );

    println!();
    if report.is_well_formed() {
        println!("{} Well-formed compression model", style("✓").green().bold());
    } else {
        println!("{} Not a well-formed compression model", style("✗").red().bold());
    }
}
