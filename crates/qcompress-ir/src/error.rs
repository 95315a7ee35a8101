//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit:?} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit:?} not found in circuit{}", format_gate_context(.gate_name))]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Invalid DAG structure.
    #[error("Invalid DAG structure: {0}")]
    InvalidDag(String),

    /// Invalid node index.
    #[error("Invalid node index")]
    InvalidNode,

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit:?} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A register with this name already exists in the circuit.
    #[error("Register '{0}' already exists in circuit")]
    DuplicateRegister(String),

    /// A register name that is not a valid identifier.
    #[error("Invalid register name '{0}'")]
    InvalidRegisterName(String),

    /// A register name that is an `OpenQASM` keyword or a loose-wire fallback.
    #[error("Register name '{0}' is reserved")]
    ReservedRegisterName(String),

    /// A register declared with zero size.
    #[error("Register '{0}' must have at least one bit")]
    EmptyRegister(String),

    /// Register lookup failed.
    #[error("Register '{0}' not found in circuit")]
    RegisterNotFound(String),

    /// Two circuits declare a register with the same name but different sizes.
    #[error("Register '{name}' has size {left} in one circuit and {right} in the other")]
    RegisterConflict {
        /// Name of the conflicting register.
        name: String,
        /// Size on the left-hand side.
        left: u32,
        /// Size on the right-hand side.
        right: u32,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
