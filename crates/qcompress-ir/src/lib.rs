//! qcompress circuit intermediate representation
//!
//! This crate provides the circuit data structures the compression-model
//! builder works on: named registers, gates, instructions and a DAG-backed
//! [`Circuit`] builder that can concatenate circuits register by register.
//!
//! # Core Components
//!
//! - **Wires**: [`QubitId`], [`ClbitId`], with [`Qubit`] / [`Clbit`] recording
//!   register membership
//! - **Registers**: [`QuantumRegister`], [`ClassicalRegister`]
//! - **Gates**: [`StandardGate`] for built-in gates (H, CX, CSWAP, etc.) and
//!   [`CustomGate`] for opaque named blocks
//! - **Parameters**: [`ParameterExpression`] for symbolic angles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Controlled swap between two registers
//!
//! ```rust
//! use qcompress_ir::Circuit;
//!
//! let mut circuit = Circuit::new("swap_demo");
//! let a = circuit.add_qreg("a", 1).unwrap();
//! let b = circuit.add_qreg("b", 1).unwrap();
//! let anc = circuit.add_qreg("anc", 1).unwrap();
//! let out = circuit.add_creg("out", 1).unwrap();
//!
//! circuit.h(anc[0]).unwrap();
//! circuit.cswap(anc[0], a[0], b[0]).unwrap();
//! circuit.h(anc[0]).unwrap();
//! circuit.measure(anc[0], out[0]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.count_ops()["cswap"], 1);
//! ```
//!
//! # Example: Concatenation
//!
//! ```rust
//! use qcompress_ir::{Circuit, QuantumRegister};
//!
//! let mut original = Circuit::new("original");
//! let q = original.add_qreg("q", 2).unwrap();
//! original.h(q[0]).unwrap();
//!
//! let model = Circuit::from_qregs("model", &[QuantumRegister::new("q_model", 2)]).unwrap();
//! let joined = original.compose(&model).unwrap();
//!
//! assert_eq!(joined.num_qubits(), 4);
//! assert_eq!(joined.qreg_qubits("q_model").unwrap().len(), 2);
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;
pub mod register;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::{Clbit, ClbitId, Qubit, QubitId, RegisterSlot};
pub use register::{
    ClassicalRegister, LOOSE_CLBITS, LOOSE_QUBITS, QuantumRegister, RESERVED_WORDS,
    is_identifier, is_reserved_name,
};
