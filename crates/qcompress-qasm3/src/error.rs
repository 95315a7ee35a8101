//! Error types for the QASM front and back end.

use qcompress_ir::IrError;
use thiserror::Error;

/// Errors that can occur during parsing, lowering or emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line} (offset {position}): {message}")]
    LexerError {
        position: usize,
        line: usize,
        message: String,
    },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Unsupported or malformed version.
    #[error("Invalid OPENQASM version: {0}")]
    InvalidVersion(String),

    /// Reference to an undeclared register.
    #[error("Undefined identifier: {0}")]
    UndefinedIdentifier(String),

    /// A name declared twice.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Gate name not in the supported set.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Wrong number of operands.
    #[error("Gate '{gate}' expects {expected} qubits, got {got}")]
    WrongQubitCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Wrong number of angle arguments.
    #[error("Gate '{gate}' expects {expected} parameters, got {got}")]
    WrongParameterCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        register: String,
        index: usize,
        size: usize,
    },

    /// Register operands of different lengths in one broadcast statement.
    #[error("Cannot broadcast '{statement}' over registers of sizes {left} and {right}")]
    BroadcastMismatch {
        statement: String,
        left: usize,
        right: usize,
    },

    /// A custom gate reached the emitter; only standard gates have a definition.
    #[error("Custom gate '{0}' has no OpenQASM definition")]
    UndefinedCustomGate(String),

    /// A constant angle with no `OpenQASM` literal form (NaN or infinite).
    #[error("Parameter value {0} cannot be written as an OpenQASM literal")]
    NonFiniteParameter(f64),

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] IrError),

    /// Anything else.
    #[error("Parse error: {0}")]
    Generic(String),
}

/// Result type for parsing and emission.
pub type ParseResult<T> = Result<T, ParseError>;
