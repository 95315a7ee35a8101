//! `OpenQASM` reader and writer for qcompress
//!
//! Circuits enter and leave the tool as `OpenQASM` text. Unlike a flat
//! `qubit[n] q;` dump, both directions keep register structure: every
//! declaration becomes a named register of the [`Circuit`], and every
//! register of the circuit is written back as its own declaration.
//!
//! # Supported Features
//!
//! | Feature | Example |
//! |---------|---------|
//! | Version declaration | `OPENQASM 3.0;`, `OPENQASM 2.0;` |
//! | Includes (ignored) | `include "stdgates.inc";` |
//! | Qubit declarations | `qubit[5] q;`, `qreg q[5];` |
//! | Classical bits | `bit[5] c;`, `creg c[5];` |
//! | Standard gates | `h q[0];`, `cswap a[0], b[0], c[0];` |
//! | Parameterized gates | `rx(pi/4) q[0];` |
//! | Register broadcast | `h q;`, `cx a, b;` |
//! | Measurements | `c = measure q;`, `measure q -> c;` |
//! | Barriers | `barrier q;`, `barrier;` |
//! | Reset | `reset q[0];` |
//!
//! # Example: Parsing
//!
//! ```rust
//! use qcompress_qasm3::parse;
//!
//! let qasm = r#"
//!     OPENQASM 3.0;
//!     qubit[2] data;
//!     bit[2] c;
//!     h data[0];
//!     cx data[0], data[1];
//!     c = measure data;
//! "#;
//!
//! let circuit = parse(qasm).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.qreg_qubits("data").unwrap().len(), 2);
//! ```
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qcompress_qasm3::{emit, parse};
//!
//! let original = r#"
//! OPENQASM 3.0;
//! qubit[1] a;
//! qubit[1] b;
//! qubit[1] anc;
//! h anc[0];
//! cswap anc[0], a[0], b[0];
//! h anc[0];
//! "#;
//!
//! let circuit = parse(original).unwrap();
//! let emitted = emit(&circuit).unwrap();
//! assert!(emitted.contains("cswap anc[0], a[0], b[0];"));
//!
//! let reparsed = parse(&emitted).unwrap();
//! assert_eq!(circuit.count_ops(), reparsed.count_ops());
//! ```
//!
//! # Supported Gates
//!
//! Single-qubit: `id`, `x`, `y`, `z`, `h`, `s`, `sdg`, `t`, `tdg`, `sx`
//!
//! Parameterized: `rx(θ)`, `ry(θ)`, `rz(θ)`, `p(θ)`, `u(θ,φ,λ)` / `u3`
//!
//! Two-qubit: `cx`, `cy`, `cz`, `swap`, `crz(θ)`, `cp(θ)`
//!
//! Three-qubit: `ccx` (Toffoli), `cswap` (Fredkin)
//!
//! [`Circuit`]: qcompress_ir::Circuit

mod ast;
mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::{emit, emit_qasm2};
pub use error::{ParseError, ParseResult};
pub use parser::{DEFAULT_CIRCUIT_NAME, parse, parse_ast};

pub use qcompress_ir::{LOOSE_CLBITS, LOOSE_QUBITS};

/// Syntax tree types returned by [`parse_ast`].
pub mod syntax {
    pub use crate::ast::*;
}
