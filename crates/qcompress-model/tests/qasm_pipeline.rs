//! QASM in, compression model out.

use qcompress_ir::{Circuit, CustomGate, QuantumRegister};
use qcompress_model::{
    CompressionModelBuilder, ModelCircuit, ModelConfig, ModelError, ModelResult, SwapTestReport,
    build_compression_model,
};
use qcompress_qasm3::{ParseError, emit, emit_qasm2, parse};

const BELL: &str = r#"
OPENQASM 3.0;
include "stdgates.inc";
qubit[2] q;
h q[0];
cx q[0], q[1];
"#;

const EXPECTED: &str = r#"OPENQASM 3.0;
include "stdgates.inc";

qubit[2] q;
qubit[2] q_model;
qubit[1] swap_tester;
bit[1] swap_test_result;

h q[0];
cx q[0], q[1];
barrier q[0], q[1], q_model[0], q_model[1];
h swap_tester[0];
cswap swap_tester[0], q[0], q_model[0];
cswap swap_tester[0], q[1], q_model[1];
h swap_tester[0];
swap_test_result[0] = measure swap_tester[0];
"#;

#[test]
fn test_bell_pair_output() {
    let circuit = parse(BELL).unwrap();
    let built = build_compression_model(&circuit).unwrap();
    assert_eq!(emit(&built).unwrap(), EXPECTED);
}

#[test]
fn test_report_survives_reparse() {
    let circuit = parse(BELL).unwrap();
    let built = build_compression_model(&circuit).unwrap();
    let config = ModelConfig::default();

    let report = SwapTestReport::inspect(&built, &config).unwrap();
    let reparsed = parse(&emit(&built).unwrap()).unwrap();
    let mut reparsed_report = SwapTestReport::inspect(&reparsed, &config).unwrap();

    // Circuit names do not travel through QASM.
    reparsed_report.circuit.clone_from(&report.circuit);
    assert_eq!(reparsed_report, report);
    assert!(reparsed_report.is_well_formed());
}

#[test]
fn test_qasm2_input_and_output() {
    let source = r#"
OPENQASM 2.0;
include "qelib1.inc";
qreg a[1];
qreg b[3];
creg c[3];
x a[0];
ccx a[0], b[0], b[1];
measure b -> c;
"#;
    let built = build_compression_model(&parse(source).unwrap()).unwrap();
    let qasm = emit_qasm2(&built).unwrap();

    assert!(qasm.contains("qreg a_model[1];\nqreg b_model[3];\nqreg swap_tester[1];"));
    assert!(qasm.contains("creg c[3];\ncreg swap_test_result[1];"));
    assert!(qasm.contains("cswap swap_tester[0], b[2], b_model[2];"));
    assert!(qasm.ends_with("measure swap_tester[0] -> swap_test_result[0];\n"));

    let report = SwapTestReport::inspect(&parse(&qasm).unwrap(), &ModelConfig::default()).unwrap();
    assert!(report.is_well_formed());
    assert_eq!(report.original_sizes(), vec![1, 3]);
    assert_eq!(report.result_clbit, Some(3));
}

#[test]
fn test_loose_qubits_from_qasm() {
    let source = r#"
OPENQASM 3.0;
qubit[1] q;
qubit[2] _loose_q;
cx _loose_q[0], q[0];
"#;
    let built = build_compression_model(&parse(source).unwrap()).unwrap();
    let qasm = emit(&built).unwrap();

    assert!(qasm.contains("qubit[1] q;\nqubit[1] q_model;\nqubit[1] swap_tester;\nqubit[2] _loose_q;"));
    assert!(qasm.contains("barrier q[0], _loose_q[0], _loose_q[1], q_model[0];"));
    assert!(
        SwapTestReport::inspect(&parse(&qasm).unwrap(), &ModelConfig::default())
            .unwrap()
            .is_well_formed()
    );
}

#[test]
fn test_reserved_names_cannot_enter_a_build() {
    // A loose-wire fallback name declared with the wrong kind is not a loose wire.
    let source = "OPENQASM 3.0;\nqubit[1] q;\nbit[1] _loose_q;\n";
    assert!(matches!(parse(source), Err(ParseError::CircuitError(_))));

    for name in ["_loose_q", "measure"] {
        let config = ModelConfig {
            ancilla_register: name.into(),
            ..Default::default()
        };
        let circuit = parse(BELL).unwrap();
        assert!(matches!(
            CompressionModelBuilder::new(config).build(&circuit),
            Err(ModelError::InvalidConfig(_))
        ));
    }
}

/// Applies an opaque `layer` block to every model qubit.
struct LayerModel;

impl ModelCircuit for LayerModel {
    fn name(&self) -> &str {
        "layer"
    }

    fn populate(&self, circuit: &mut Circuit, registers: &[QuantumRegister]) -> ModelResult<()> {
        for reg in registers {
            for q in circuit.qreg_qubits(&reg.name)?.to_vec() {
                circuit.gate(CustomGate::new("layer", 1), [q])?;
            }
        }
        Ok(())
    }
}

#[test]
fn test_custom_gate_model_is_not_emitted() {
    let built = CompressionModelBuilder::new(ModelConfig::default())
        .with_model(LayerModel)
        .build(&parse(BELL).unwrap())
        .unwrap();
    assert_eq!(built.count_ops()["layer"], 2);

    let err = emit(&built).unwrap_err();
    assert!(matches!(err, ParseError::UndefinedCustomGate(ref n) if n == "layer"));
    assert!(emit_qasm2(&built).is_err());
}
