//! Property-based tests for register-aware concatenation.

use proptest::prelude::*;
use qcompress_ir::{Circuit, QuantumRegister};

/// Register layouts with 0-4 registers of 1-4 qubits each.
fn arb_layout(prefix: &'static str) -> impl Strategy<Value = Vec<QuantumRegister>> {
    prop::collection::vec(1_u32..=4, 0..=4).prop_map(move |sizes| {
        sizes
            .into_iter()
            .enumerate()
            .map(|(i, size)| QuantumRegister::new(format!("{prefix}{i}"), size))
            .collect()
    })
}

/// A circuit over `regs` with an H on every qubit.
fn hadamard_layer(name: &str, regs: &[QuantumRegister]) -> Circuit {
    let mut circuit = Circuit::from_qregs(name, regs).unwrap();
    let qubits: Vec<_> = circuit.qubits().iter().map(|q| q.id).collect();
    for q in qubits {
        circuit.h(q).unwrap();
    }
    circuit
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Disjoint registers are all kept, left side first, sizes unchanged.
    #[test]
    fn compose_keeps_register_order(left in arb_layout("a"), right in arb_layout("b")) {
        let l = hadamard_layer("l", &left);
        let r = hadamard_layer("r", &right);
        let joined = l.compose(&r).unwrap();

        let expected: Vec<_> = left.iter().chain(right.iter()).cloned().collect();
        let got: Vec<_> = joined.qregs().cloned().collect();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(joined.num_qubits(), l.num_qubits() + r.num_qubits());
        prop_assert_eq!(
            joined.instructions().count(),
            l.instructions().count() + r.instructions().count()
        );
        joined.dag().verify_integrity().unwrap();
    }

    /// Composing a circuit with itself shares every register.
    #[test]
    fn compose_with_self_shares_wires(layout in arb_layout("q")) {
        let c = hadamard_layer("c", &layout);
        let joined = c.compose(&c).unwrap();

        prop_assert_eq!(joined.num_qubits(), c.num_qubits());
        prop_assert_eq!(joined.instructions().count(), 2 * c.instructions().count());
    }

    /// The left operand's instructions come first and are unchanged.
    #[test]
    fn compose_preserves_left_prefix(left in arb_layout("a"), right in arb_layout("b")) {
        let l = hadamard_layer("l", &left);
        let r = hadamard_layer("r", &right);
        let joined = l.compose(&r).unwrap();

        let prefix: Vec<_> = joined.instructions().take(l.instructions().count()).collect();
        let original: Vec<_> = l.instructions().collect();
        prop_assert_eq!(prefix, original);
    }
}
