//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;

use qcompress_ir::Circuit;
use qcompress_model::ModelConfig;
use qcompress_qasm3::parse;

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, styled for the terminal.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Load a circuit from an OpenQASM file.
pub fn load_circuit(path: &Path) -> Result<Circuit> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let mut circuit =
        parse(&source).with_context(|| format!("Parse error in {}", path.display()))?;

    // Name the circuit after the file so the result reads `{stem}_compression`.
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        circuit.set_name(stem);
    }

    debug!(
        path = %path.display(),
        qubits = circuit.num_qubits(),
        registers = circuit.qregs().count(),
        "Loaded circuit"
    );
    Ok(circuit)
}

/// Configuration from an optional file, with `QCOMPRESS_*` overrides.
pub fn load_config(path: Option<&Path>) -> Result<ModelConfig> {
    let config = ModelConfig::load(path).context("Failed to load configuration")?;
    debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display())),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
