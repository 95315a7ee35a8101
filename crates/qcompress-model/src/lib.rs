//! Compression-model circuits verified by a swap test
//!
//! Given a circuit preparing some state |ψ⟩, this crate builds the circuit
//! that runs it side by side with a *model* circuit on mirrored registers and
//! compares the two states with a swap test. The model itself is pluggable
//! through [`ModelCircuit`]; the only model shipped is [`EmptyModel`].
//!
//! # Layout of a built circuit
//!
//! ```text
//! q        ─[original]─░─────●────────
//! q_model  ─[model]────░─────x────────
//!                      ░     x
//! swap_tester ─────────────H─■──H─M───
//! swap_test_result ═══════════════╩═══
//! ```
//!
//! # Example
//!
//! ```rust
//! use qcompress_ir::Circuit;
//! use qcompress_model::{ModelConfig, SwapTestReport, build_compression_model};
//!
//! let mut circuit = Circuit::new("bell");
//! let q = circuit.add_qreg("q", 2).unwrap();
//! circuit.h(q[0]).unwrap();
//! circuit.cx(q[0], q[1]).unwrap();
//!
//! let built = build_compression_model(&circuit).unwrap();
//! assert_eq!(built.name(), "bell_compression");
//! assert_eq!(built.count_ops()["cswap"], 2);
//!
//! let report = SwapTestReport::inspect(&built, &ModelConfig::default()).unwrap();
//! assert!(report.is_well_formed());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod outcome;
pub mod report;

pub use builder::{
    CompressionModelBuilder, build_compression_model, mirror_registers, model_circuit,
};
pub use config::ModelConfig;
pub use error::{ModelError, ModelResult};
pub use model::{EmptyModel, ModelCircuit};
pub use outcome::SwapTestOutcome;
pub use report::{RegisterPair, SwapTestReport};
pub use swap_test::{SwapTestWires, append_swap_test};
