//! Named quantum and classical registers.
//!
//! Registers are value-like descriptors: a name and a size. A [`Circuit`]
//! owns the wires behind them and can resolve a register name to the ordered
//! list of [`QubitId`]s or [`ClbitId`]s it was allocated.
//!
//! [`Circuit`]: crate::Circuit
//! [`QubitId`]: crate::QubitId
//! [`ClbitId`]: crate::ClbitId

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A named, sized collection of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumRegister {
    /// Register name, unique among the quantum registers of a circuit.
    pub name: String,
    /// Number of qubits.
    pub size: u32,
}

impl QuantumRegister {
    /// Create a new register descriptor.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// A register of the same size under a new name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.size)
    }

    /// Check that the name is an identifier and the size is non-zero.
    pub fn validate(&self) -> IrResult<()> {
        validate_register(&self.name, self.size)
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qubit[{}] {}", self.size, self.name)
    }
}

/// A named, sized collection of classical bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name, unique among the classical registers of a circuit.
    pub name: String,
    /// Number of bits.
    pub size: u32,
}

impl ClassicalRegister {
    /// Create a new register descriptor.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Check that the name is an identifier and the size is non-zero.
    pub fn validate(&self) -> IrResult<()> {
        validate_register(&self.name, self.size)
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bit[{}] {}", self.size, self.name)
    }
}

/// Fallback register holding qubits that belong to no register.
///
/// Emitted source declares loose qubits under this name, so no circuit
/// register may take it.
pub const LOOSE_QUBITS: &str = "_loose_q";

/// Fallback register holding classical bits that belong to no register.
pub const LOOSE_CLBITS: &str = "_loose_c";

/// `OpenQASM` keywords and built-in constants the lexer never reads as
/// identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "OPENQASM", "include", "qubit", "bit", "qreg", "creg", "measure", "reset", "barrier", "pi",
    "tau", "euler",
];

/// Returns `true` if `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns `true` if `name` is a keyword or one of the loose-wire fallback
/// registers.
pub fn is_reserved_name(name: &str) -> bool {
    name == LOOSE_QUBITS || name == LOOSE_CLBITS || RESERVED_WORDS.contains(&name)
}

fn validate_register(name: &str, size: u32) -> IrResult<()> {
    if !is_identifier(name) {
        return Err(IrError::InvalidRegisterName(name.to_string()));
    }
    if is_reserved_name(name) {
        return Err(IrError::ReservedRegisterName(name.to_string()));
    }
    if size == 0 {
        return Err(IrError::EmptyRegister(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("q"));
        assert!(is_identifier("_anc0"));
        assert!(is_identifier("q_model"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("0q"));
        assert!(!is_identifier("q-model"));
        assert!(!is_identifier("q[0]"));
    }

    #[test]
    fn test_renamed_keeps_size() {
        let reg = QuantumRegister::new("data", 3);
        let model = reg.renamed("data_model");
        assert_eq!(model.size, 3);
        assert_eq!(model.name, "data_model");
    }

    #[test]
    fn test_validate_rejects_empty_register() {
        let err = QuantumRegister::new("q", 0).validate().unwrap_err();
        assert!(matches!(err, IrError::EmptyRegister(ref n) if n == "q"));

        let err = ClassicalRegister::new("1c", 2).validate().unwrap_err();
        assert!(matches!(err, IrError::InvalidRegisterName(_)));
    }

    #[test]
    fn test_validate_rejects_reserved_names() {
        for name in ["_loose_q", "_loose_c", "measure", "qubit", "pi", "OPENQASM"] {
            let err = QuantumRegister::new(name, 1).validate().unwrap_err();
            assert!(matches!(err, IrError::ReservedRegisterName(ref n) if n == name));
            assert!(ClassicalRegister::new(name, 1).validate().is_err());
        }

        assert!(is_reserved_name("euler"));
        assert!(!is_reserved_name("_loose"));
        assert!(!is_reserved_name("Measure"));
        assert!(QuantumRegister::new("measured", 1).validate().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(QuantumRegister::new("q", 2).to_string(), "qubit[2] q");
        assert_eq!(ClassicalRegister::new("c", 1).to_string(), "bit[1] c");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&QuantumRegister::new("q", 2)).unwrap();
        assert_eq!(json, r#"{"name":"q","size":2}"#);
    }
}
