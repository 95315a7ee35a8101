//! The seam where a compression model plugs into the builder.

use qcompress_ir::{Circuit, QuantumRegister};

use crate::error::ModelResult;

/// A circuit that approximates the state prepared by the original circuit.
///
/// `populate` receives a circuit that already declares `registers` (the
/// mirrored model registers, in original order) and appends the model's
/// operations to it. Implementations may add further registers of their own
/// as long as they do not reuse an original register name.
pub trait ModelCircuit {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Append the model's operations.
    fn populate(&self, circuit: &mut Circuit, registers: &[QuantumRegister]) -> ModelResult<()>;
}

/// A model that applies no operations, leaving every model qubit in |0⟩.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyModel;

impl ModelCircuit for EmptyModel {
    fn name(&self) -> &str {
        "empty"
    }

    fn populate(&self, _circuit: &mut Circuit, _registers: &[QuantumRegister]) -> ModelResult<()> {
        Ok(())
    }
}

impl<M: ModelCircuit + ?Sized> ModelCircuit for &M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn populate(&self, circuit: &mut Circuit, registers: &[QuantumRegister]) -> ModelResult<()> {
        (**self).populate(circuit, registers)
    }
}

impl<M: ModelCircuit + ?Sized> ModelCircuit for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn populate(&self, circuit: &mut Circuit, registers: &[QuantumRegister]) -> ModelResult<()> {
        (**self).populate(circuit, registers)
    }
}
