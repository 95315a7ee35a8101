//! Build command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qcompress_model::CompressionModelBuilder;
use qcompress_qasm3::{emit, emit_qasm2};

use super::common::{load_circuit, load_config, write_output};

/// Execute the build command.
///
/// Progress goes to stderr so the circuit can be piped from stdout.
pub fn execute(
    input: &Path,
    output: Option<&Path>,
    qasm2: bool,
    config: Option<&Path>,
) -> Result<()> {
    eprintln!(
        "{} Building compression model for {}",
        style("→").cyan().bold(),
        style(input.display()).green()
    );

    let config = load_config(config)?;
    let circuit = load_circuit(input)?;
    eprintln!(
        "  Loaded: {} qubits in {} registers, depth {}",
        circuit.num_qubits(),
        circuit.qregs().count(),
        circuit.depth()
    );

    let built = CompressionModelBuilder::new(config)
        .build(&circuit)
        .context("Failed to build compression model")?;

    eprintln!("{} Built {}", style("✓").green().bold(), style(built.name()).yellow());
    eprintln!(
        "  Result: {} qubits, depth {}, {} ops",
        built.num_qubits(),
        built.depth(),
        built.dag().num_ops()
    );

    let qasm = if qasm2 {
        emit_qasm2(&built)
    } else {
        emit(&built)
    };
    let qasm = qasm.context("Failed to emit QASM")?;
    write_output(&qasm, output)?;

    if let Some(path) = output {
        eprintln!("  Output: {}", style(path.display()).green());
    }

    Ok(())
}
