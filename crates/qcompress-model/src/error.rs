//! Error types for compression-model construction.

use std::path::PathBuf;

use qcompress_ir::IrError;
use thiserror::Error;

/// Errors raised while building or analysing a compression-model circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A register the builder needs to add is already declared.
    #[error("Register '{0}' already exists in the circuit")]
    RegisterNameTaken(String),

    /// The two registers of a swap-test pair differ in size.
    #[error(
        "Cannot swap-test register '{original}' ({original_size} qubits) against '{model}' ({model_size} qubits)"
    )]
    RegisterSizeMismatch {
        /// Register holding the original state.
        original: String,
        /// Its size.
        original_size: usize,
        /// Register holding the model state.
        model: String,
        /// Its size.
        model_size: usize,
    },

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Measurement counts are unusable.
    #[error("Invalid counts: {0}")]
    InvalidCounts(String),

    /// Configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML for [`ModelConfig`](crate::ModelConfig).
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// Error from the circuit IR.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
