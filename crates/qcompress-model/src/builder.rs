//! Compression-model circuit construction.

use qcompress_ir::{Circuit, QuantumRegister};
use tracing::{debug, info, instrument};

use crate::config::ModelConfig;
use crate::error::{ModelError, ModelResult};
use crate::model::{EmptyModel, ModelCircuit};
use crate::swap_test::append_swap_test;

/// Build the compression-model circuit for `circuit` with default naming and
/// the [`EmptyModel`].
pub fn build_compression_model(circuit: &Circuit) -> ModelResult<Circuit> {
    CompressionModelBuilder::new(ModelConfig::default()).build(circuit)
}

/// Model register descriptors for every quantum register of `circuit`.
///
/// Each register `r` yields `"{r}{suffix}"` of the same size, in declaration
/// order. Loose qubits have no register and are not mirrored.
pub fn mirror_registers(circuit: &Circuit, suffix: &str) -> Vec<QuantumRegister> {
    circuit
        .qregs()
        .map(|reg| reg.renamed(format!("{}{suffix}", reg.name)))
        .collect()
}

/// A circuit over `registers` populated by `model`.
pub fn model_circuit(
    registers: &[QuantumRegister],
    model: &dyn ModelCircuit,
) -> ModelResult<Circuit> {
    let mut circuit = Circuit::from_qregs(model.name(), registers)?;
    model.populate(&mut circuit, registers)?;
    Ok(circuit)
}

/// Builds `original ∥ model`, a barrier, and a swap test between every
/// original register and its model register.
#[derive(Debug, Clone)]
pub struct CompressionModelBuilder<M = EmptyModel> {
    config: ModelConfig,
    model: M,
}

impl CompressionModelBuilder<EmptyModel> {
    /// Create a builder using the [`EmptyModel`].
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            model: EmptyModel,
        }
    }
}

impl Default for CompressionModelBuilder<EmptyModel> {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl<M: ModelCircuit> CompressionModelBuilder<M> {
    /// Replace the model.
    pub fn with_model<N: ModelCircuit>(self, model: N) -> CompressionModelBuilder<N> {
        CompressionModelBuilder {
            config: self.config,
            model,
        }
    }

    /// The naming configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Build the compression-model circuit. `circuit` is not modified.
    ///
    /// The result contains, in order: the operations of `circuit`, the
    /// operations of the model, one barrier over every qubit, and the swap
    /// test. It is named `"{circuit}{circuit_suffix}"`.
    #[instrument(skip(self, circuit), fields(circuit = %circuit.name(), model = %self.model.name()))]
    pub fn build(&self, circuit: &Circuit) -> ModelResult<Circuit> {
        self.config.validate()?;

        info!(
            registers = circuit.qregs().count(),
            qubits = circuit.num_qubits(),
            ops = circuit.dag().num_ops(),
            "Building compression model"
        );

        let loose = circuit
            .qubits()
            .iter()
            .filter(|q| q.register().is_none())
            .count();
        if loose > 0 {
            debug!(loose, "Loose qubits are not mirrored into the model");
        }

        let registers = mirror_registers(circuit, &self.config.model_suffix);
        for reg in &registers {
            if circuit.has_qreg(&reg.name) || circuit.has_creg(&reg.name) {
                return Err(ModelError::RegisterNameTaken(reg.name.clone()));
            }
            debug!(register = %reg.name, size = reg.size, "Mirrored register");
        }

        let model = model_circuit(&registers, &self.model)?;
        // Extra model registers must not alias the original's wires.
        for reg in model.qregs().filter(|r| !registers.contains(r)) {
            if circuit.has_qreg(&reg.name) {
                return Err(ModelError::RegisterNameTaken(reg.name.clone()));
            }
        }

        let mut top = circuit.compose(&model)?;
        top.set_name(format!("{}{}", circuit.name(), self.config.circuit_suffix));
        top.barrier_all()?;

        let pairs: Vec<(&str, &str)> = circuit
            .qregs()
            .zip(&registers)
            .map(|(original, model)| (original.name.as_str(), model.name.as_str()))
            .collect();
        let wires = append_swap_test(
            &mut top,
            &pairs,
            &self.config.ancilla_register,
            &self.config.result_register,
        )?;

        info!(
            name = %top.name(),
            qubits = top.num_qubits(),
            ops = top.dag().num_ops(),
            depth = top.depth(),
            ancilla = %wires.ancilla,
            result = %wires.result,
            "Compression model built"
        );

        Ok(top)
    }
}
