//! Structural inspection of compression-model circuits.
//!
//! [`SwapTestReport::inspect`] works on any circuit, not just ones produced
//! by the builder, so a circuit read back from QASM can be checked the same
//! way as a freshly built one.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use qcompress_ir::{Circuit, ClassicalRegister, QuantumRegister, QubitId};

use crate::config::ModelConfig;
use crate::error::ModelResult;

/// An original register and the model register mirroring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPair {
    /// Register holding the original state.
    pub original: QuantumRegister,
    /// Register holding the model state.
    pub model: QuantumRegister,
    /// Ancilla-controlled swaps between matching positions of the two.
    pub fredkin_gates: usize,
    /// Whether every position is swapped exactly once.
    pub complete: bool,
}

impl RegisterPair {
    /// Whether the model register mirrors the original's size.
    pub fn sizes_match(&self) -> bool {
        self.original.size == self.model.size
    }
}

/// What a circuit contains of the compression-model structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTestReport {
    /// Circuit name.
    pub circuit: String,
    /// Original/model register pairs, in original declaration order.
    pub pairs: Vec<RegisterPair>,
    /// Quantum registers that are neither paired nor the ancilla.
    pub unpaired_registers: Vec<QuantumRegister>,
    /// The ancilla register, if declared.
    pub ancilla: Option<QuantumRegister>,
    /// The result register, if declared.
    pub result: Option<ClassicalRegister>,
    /// Number of barrier instructions.
    pub barrier_count: usize,
    /// Pairs whose controlled-swap stage is complete.
    pub cswap_stages: usize,
    /// Controlled swaps whose control is the ancilla.
    pub fredkin_gates: usize,
    /// Hadamard gates on the ancilla.
    pub ancilla_hadamards: usize,
    /// Index of the result bit among all classical bits.
    pub result_clbit: Option<u32>,
    /// The last operation on the ancilla measures it into the result bit.
    pub result_measured_last: bool,
    /// The only barrier comes before the first operation on the ancilla.
    pub barrier_precedes_swap_test: bool,
}

impl SwapTestReport {
    /// Inspect `circuit` using the register names in `config`.
    pub fn inspect(circuit: &Circuit, config: &ModelConfig) -> ModelResult<Self> {
        config.validate()?;

        let ancilla = circuit
            .qregs()
            .find(|r| r.name == config.ancilla_register)
            .cloned();
        let result = circuit
            .cregs()
            .find(|r| r.name == config.result_register)
            .cloned();

        let ancilla_qubit = match &ancilla {
            Some(reg) => circuit.qreg_qubits(&reg.name)?.first().copied(),
            None => None,
        };
        let result_bit = match &result {
            Some(reg) => circuit.creg_clbits(&reg.name)?.first().copied(),
            None => None,
        };

        let (pairs, unpaired_registers) = pair_registers(circuit, config);

        // (original, model) qubit → (pair, position)
        let mut targets: FxHashMap<(QubitId, QubitId), (usize, usize)> = FxHashMap::default();
        for (p, pair) in pairs.iter().enumerate() {
            let original = circuit.qreg_qubits(&pair.original.name)?;
            let model = circuit.qreg_qubits(&pair.model.name)?;
            for (i, (&a, &b)) in original.iter().zip(model).enumerate() {
                targets.insert((a, b), (p, i));
            }
        }
        let mut hits: Vec<Vec<usize>> = pairs
            .iter()
            .map(|p| vec![0; p.original.size.min(p.model.size) as usize])
            .collect();

        let mut barrier_count = 0;
        let mut first_barrier = None;
        let mut first_ancilla_op = None;
        let mut last_ancilla_op = None;
        let mut fredkin_gates = 0;
        let mut ancilla_hadamards = 0;

        for (pos, inst) in circuit.instructions().enumerate() {
            if inst.is_barrier() {
                barrier_count += 1;
                first_barrier.get_or_insert(pos);
                continue;
            }

            let Some(anc) = ancilla_qubit else { continue };
            if !inst.qubits.contains(&anc) {
                continue;
            }
            first_ancilla_op.get_or_insert(pos);
            last_ancilla_op = Some(inst);

            if inst.is_cswap() && inst.qubits[0] == anc {
                fredkin_gates += 1;
                if let Some(&(p, i)) = targets.get(&(inst.qubits[1], inst.qubits[2])) {
                    hits[p][i] += 1;
                }
            } else if inst.name() == "h" {
                ancilla_hadamards += 1;
            }
        }

        let pairs: Vec<RegisterPair> = pairs
            .into_iter()
            .zip(&hits)
            .map(|(mut pair, hits)| {
                pair.fredkin_gates = hits.iter().sum();
                pair.complete = pair.sizes_match() && hits.iter().all(|&h| h == 1);
                pair
            })
            .collect();

        let result_measured_last = match (last_ancilla_op, ancilla_qubit, result_bit) {
            (Some(inst), Some(anc), Some(bit)) => {
                inst.is_measure() && inst.qubits == [anc] && inst.clbits == [bit]
            }
            _ => false,
        };

        let barrier_precedes_swap_test = barrier_count == 1
            && match (first_barrier, first_ancilla_op) {
                (Some(barrier), Some(first)) => barrier < first,
                _ => false,
            };

        Ok(Self {
            circuit: circuit.name().to_string(),
            cswap_stages: pairs.iter().filter(|p| p.complete).count(),
            pairs,
            unpaired_registers,
            ancilla,
            result,
            barrier_count,
            fredkin_gates,
            ancilla_hadamards,
            result_clbit: result_bit.map(|b| b.0),
            result_measured_last,
            barrier_precedes_swap_test,
        })
    }

    /// Sizes of the original registers, in order.
    pub fn original_sizes(&self) -> Vec<u32> {
        self.pairs.iter().map(|p| p.original.size).collect()
    }

    /// Sizes of the model registers, in order.
    pub fn model_sizes(&self) -> Vec<u32> {
        self.pairs.iter().map(|p| p.model.size).collect()
    }

    /// Whether the circuit has exactly the compression-model structure.
    pub fn is_well_formed(&self) -> bool {
        let expected_fredkins: usize = self.pairs.iter().map(|p| p.original.size as usize).sum();

        self.ancilla.as_ref().is_some_and(|r| r.size == 1)
            && self.result.as_ref().is_some_and(|r| r.size == 1)
            && self.unpaired_registers.is_empty()
            && self.cswap_stages == self.pairs.len()
            && self.fredkin_gates == expected_fredkins
            && self.ancilla_hadamards == 2
            && self.result_measured_last
            && self.barrier_precedes_swap_test
    }
}

/// Split the quantum registers into `(r, r{suffix})` pairs and the rest.
fn pair_registers(
    circuit: &Circuit,
    config: &ModelConfig,
) -> (Vec<RegisterPair>, Vec<QuantumRegister>) {
    let mut pairs = Vec::new();
    let mut claimed: Vec<&str> = Vec::new();

    for reg in circuit.qregs() {
        if reg.name == config.ancilla_register || claimed.contains(&reg.name.as_str()) {
            continue;
        }
        let mirror_name = format!("{}{}", reg.name, config.model_suffix);
        if let Some(model) = circuit.qregs().find(|r| r.name == mirror_name) {
            claimed.push(reg.name.as_str());
            claimed.push(model.name.as_str());
            pairs.push(RegisterPair {
                original: reg.clone(),
                model: model.clone(),
                fredkin_gates: 0,
                complete: false,
            });
        }
    }

    let unpaired = circuit
        .qregs()
        .filter(|r| r.name != config.ancilla_register && !claimed.contains(&r.name.as_str()))
        .cloned()
        .collect();

    (pairs, unpaired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_compression_model;

    fn two_registers() -> Circuit {
        let mut circuit = Circuit::new("pair");
        let a = circuit.add_qreg("a", 2).unwrap();
        let b = circuit.add_qreg("b", 1).unwrap();
        circuit.h(a[0]).unwrap();
        circuit.cx(a[1], b[0]).unwrap();
        circuit
    }

    #[test]
    fn test_built_circuit_is_well_formed() {
        let built = build_compression_model(&two_registers()).unwrap();
        let report = SwapTestReport::inspect(&built, &ModelConfig::default()).unwrap();

        assert!(report.is_well_formed(), "{report:?}");
        assert_eq!(report.original_sizes(), vec![2, 1]);
        assert_eq!(report.model_sizes(), vec![2, 1]);
        assert_eq!(report.barrier_count, 1);
        assert_eq!(report.cswap_stages, 2);
        assert_eq!(report.fredkin_gates, 3);
        assert_eq!(report.result_clbit, Some(0));
        assert_eq!(report.circuit, "pair_compression");
    }

    #[test]
    fn test_plain_circuit_is_not_well_formed() {
        let report = SwapTestReport::inspect(&two_registers(), &ModelConfig::default()).unwrap();

        assert!(!report.is_well_formed());
        assert!(report.pairs.is_empty());
        assert_eq!(report.unpaired_registers.len(), 2);
        assert!(report.ancilla.is_none());
        assert!(report.result_clbit.is_none());
    }

    #[test]
    fn test_missing_fredkin_is_detected() {
        let mut circuit = Circuit::new("broken");
        circuit.add_qreg("q", 2).unwrap();
        circuit.add_qreg("q_model", 2).unwrap();
        circuit.barrier_all().unwrap();
        let anc = circuit.add_qreg("swap_tester", 1).unwrap()[0];
        let res = circuit.add_creg("swap_test_result", 1).unwrap()[0];
        circuit.h(anc).unwrap();
        circuit.cswap(anc, QubitId(0), QubitId(2)).unwrap();
        circuit.h(anc).unwrap();
        circuit.measure(anc, res).unwrap();

        let report = SwapTestReport::inspect(&circuit, &ModelConfig::default()).unwrap();
        assert_eq!(report.pairs[0].fredkin_gates, 1);
        assert!(!report.pairs[0].complete);
        assert_eq!(report.cswap_stages, 0);
        assert!(!report.is_well_formed());
    }

    #[test]
    fn test_late_barrier_is_detected() {
        let mut circuit = Circuit::new("late");
        let anc = circuit.add_qreg("swap_tester", 1).unwrap()[0];
        let res = circuit.add_creg("swap_test_result", 1).unwrap()[0];
        circuit.h(anc).unwrap();
        circuit.h(anc).unwrap();
        circuit.barrier_all().unwrap();
        circuit.measure(anc, res).unwrap();

        let report = SwapTestReport::inspect(&circuit, &ModelConfig::default()).unwrap();
        assert!(!report.barrier_precedes_swap_test);
        assert!(report.result_measured_last);
        assert!(!report.is_well_formed());
    }

    #[test]
    fn test_custom_names() {
        let config = ModelConfig {
            model_suffix: "_m".into(),
            ancilla_register: "anc".into(),
            result_register: "res".into(),
            ..Default::default()
        };
        let built = crate::CompressionModelBuilder::new(config.clone())
            .build(&two_registers())
            .unwrap();

        assert!(SwapTestReport::inspect(&built, &config).unwrap().is_well_formed());
        assert!(
            !SwapTestReport::inspect(&built, &ModelConfig::default())
                .unwrap()
                .is_well_formed()
        );
    }

    #[test]
    fn test_report_serializes() {
        let built = build_compression_model(&two_registers()).unwrap();
        let report = SwapTestReport::inspect(&built, &ModelConfig::default()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["barrier_count"], 1);
        assert_eq!(json["pairs"][0]["model"]["name"], "a_model");
        assert_eq!(json["ancilla"]["name"], "swap_tester");
    }
}
