//! `OpenQASM` emitters.
//!
//! Both dialects declare one register per circuit register, in declaration
//! order, and address every operand as `register[index]`. Wires that belong
//! to no register are collected into the `_loose_q` / `_loose_c` fallback
//! registers, which the parser turns back into loose wires.

use qcompress_ir::{
    Circuit, ClbitId, GateKind, Instruction, InstructionKind, ParameterExpression, QubitId,
    StandardGate,
};
use rustc_hash::FxHashMap;

use crate::error::{ParseError, ParseResult};
use crate::{LOOSE_CLBITS, LOOSE_QUBITS};

/// Emit a circuit as `OpenQASM` 3.0 source.
pub fn emit(circuit: &Circuit) -> ParseResult<String> {
    Emitter::new(circuit, Dialect::Qasm3).emit_circuit(circuit)
}

/// Emit a circuit as `OpenQASM` 2.0 source.
///
/// Register declarations use `qreg name[n];` / `creg name[n];`, measurements
/// use `measure q[i] -> c[j];` and the U gate is written as `u3`.
pub fn emit_qasm2(circuit: &Circuit) -> ParseResult<String> {
    Emitter::new(circuit, Dialect::Qasm2).emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm3,
    Qasm2,
}

struct Emitter {
    dialect: Dialect,
    output: String,
    qubit_labels: FxHashMap<QubitId, String>,
    clbit_labels: FxHashMap<ClbitId, String>,
}

impl Emitter {
    fn new(circuit: &Circuit, dialect: Dialect) -> Self {
        let mut loose = 0u32;
        let qubit_labels = circuit
            .qubits()
            .iter()
            .map(|q| {
                let label = match &q.slot {
                    Some(slot) => slot.to_string(),
                    None => {
                        loose += 1;
                        format!("{LOOSE_QUBITS}[{}]", loose - 1)
                    }
                };
                (q.id, label)
            })
            .collect();

        let mut loose = 0u32;
        let clbit_labels = circuit
            .clbits()
            .iter()
            .map(|c| {
                let label = match &c.slot {
                    Some(slot) => slot.to_string(),
                    None => {
                        loose += 1;
                        format!("{LOOSE_CLBITS}[{}]", loose - 1)
                    }
                };
                (c.id, label)
            })
            .collect();

        Self {
            dialect,
            output: String::new(),
            qubit_labels,
            clbit_labels,
        }
    }

    fn emit_circuit(mut self, circuit: &Circuit) -> ParseResult<String> {
        match self.dialect {
            Dialect::Qasm3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
            }
            Dialect::Qasm2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
            }
        }
        self.writeln("");

        let loose_qubits = circuit.qubits().iter().filter(|q| q.slot.is_none()).count();
        let loose_clbits = circuit.clbits().iter().filter(|c| c.slot.is_none()).count();

        for reg in circuit.qregs() {
            self.declare(true, &reg.name, reg.size as usize);
        }
        if loose_qubits > 0 {
            self.declare(true, LOOSE_QUBITS, loose_qubits);
        }
        for reg in circuit.cregs() {
            self.declare(false, &reg.name, reg.size as usize);
        }
        if loose_clbits > 0 {
            self.declare(false, LOOSE_CLBITS, loose_clbits);
        }
        if circuit.num_qubits() > 0 || circuit.num_clbits() > 0 {
            self.writeln("");
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction)?;
        }

        Ok(self.output)
    }

    fn declare(&mut self, quantum: bool, name: &str, size: usize) {
        let line = match (self.dialect, quantum) {
            (Dialect::Qasm3, true) => format!("qubit[{size}] {name};"),
            (Dialect::Qasm3, false) => format!("bit[{size}] {name};"),
            (Dialect::Qasm2, true) => format!("qreg {name}[{size}];"),
            (Dialect::Qasm2, false) => format!("creg {name}[{size}];"),
        };
        self.writeln(&line);
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> ParseResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = self.gate_name(&gate.kind)?;
                let params = gate
                    .kind
                    .parameters()
                    .into_iter()
                    .map(emit_param)
                    .collect::<ParseResult<Vec<_>>>()?
                    .join(", ");
                let qubits = self.qubits(&instruction.qubits)?;

                if params.is_empty() {
                    self.writeln(&format!("{name} {qubits};"));
                } else {
                    self.writeln(&format!("{name}({params}) {qubits};"));
                }
            }

            InstructionKind::Measure => {
                for (q, c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    let q = self.qubit(*q)?;
                    let c = self.clbit(*c)?;
                    let line = match self.dialect {
                        Dialect::Qasm3 => format!("{c} = measure {q};"),
                        Dialect::Qasm2 => format!("measure {q} -> {c};"),
                    };
                    self.writeln(&line);
                }
            }

            InstructionKind::Reset => {
                let qubits = self.qubits(&instruction.qubits)?;
                self.writeln(&format!("reset {qubits};"));
            }

            InstructionKind::Barrier => {
                let qubits = self.qubits(&instruction.qubits)?;
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }

        Ok(())
    }

    fn gate_name(&self, kind: &GateKind) -> ParseResult<String> {
        match kind {
            GateKind::Standard(StandardGate::U(..)) if self.dialect == Dialect::Qasm2 => {
                Ok("u3".into())
            }
            GateKind::Standard(gate) => Ok(gate.name().to_string()),
            GateKind::Custom(gate) => Err(ParseError::UndefinedCustomGate(gate.name.clone())),
        }
    }

    fn qubit(&self, id: QubitId) -> ParseResult<&str> {
        self.qubit_labels
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| ParseError::Generic(format!("qubit {id} has no declaration")))
    }

    fn clbit(&self, id: ClbitId) -> ParseResult<&str> {
        self.clbit_labels
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| ParseError::Generic(format!("clbit {id} has no declaration")))
    }

    fn qubits(&self, ids: &[QubitId]) -> ParseResult<String> {
        Ok(ids
            .iter()
            .map(|&q| self.qubit(q))
            .collect::<ParseResult<Vec<_>>>()?
            .join(", "))
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Format a parameter, recognising common fractions of pi.
///
/// Magnitudes outside `[1e-5, 1e15)` are written in exponent form, which the
/// lexer reads back as a float literal.
fn emit_param(param: &ParameterExpression) -> ParseResult<String> {
    Ok(match param {
        ParameterExpression::Constant(v) => emit_constant(*v)?,
        ParameterExpression::Symbol(name) => name.clone(),
        ParameterExpression::Pi => "pi".into(),
        ParameterExpression::Neg(e) => format!("-({})", emit_param(e)?),
        ParameterExpression::Add(a, b) => format!("({} + {})", emit_param(a)?, emit_param(b)?),
        ParameterExpression::Sub(a, b) => format!("({} - {})", emit_param(a)?, emit_param(b)?),
        ParameterExpression::Mul(a, b) => format!("({} * {})", emit_param(a)?, emit_param(b)?),
        ParameterExpression::Div(a, b) => format!("({} / {})", emit_param(a)?, emit_param(b)?),
    })
}

fn emit_constant(v: f64) -> ParseResult<String> {
    if !v.is_finite() {
        return Err(ParseError::NonFiniteParameter(v));
    }

    let pi = std::f64::consts::PI;
    for (value, text) in [
        (pi, "pi"),
        (pi / 2.0, "pi/2"),
        (pi / 4.0, "pi/4"),
        (-pi, "-pi"),
        (-pi / 2.0, "-pi/2"),
        (-pi / 4.0, "-pi/4"),
    ] {
        if (v - value).abs() < 1e-10 {
            return Ok(text.into());
        }
    }

    let magnitude = v.abs();
    if magnitude >= 1e15 || (magnitude > 0.0 && magnitude < 1e-5) {
        Ok(format!("{v:e}"))
    } else {
        Ok(format!("{v}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcompress_ir::CustomGate;

    fn swap_test_fixture() -> Circuit {
        let mut circuit = Circuit::new("fixture");
        let a = circuit.add_qreg("a", 1).unwrap();
        let b = circuit.add_qreg("b", 1).unwrap();
        let anc = circuit.add_qreg("anc", 1).unwrap();
        let out = circuit.add_creg("out", 1).unwrap();
        circuit.barrier_all().unwrap();
        circuit.h(anc[0]).unwrap();
        circuit.cswap(anc[0], a[0], b[0]).unwrap();
        circuit.h(anc[0]).unwrap();
        circuit.measure(anc[0], out[0]).unwrap();
        circuit
    }

    #[test]
    fn test_emit_registers_by_name() {
        let qasm = emit(&swap_test_fixture()).unwrap();

        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[1] a;\nqubit[1] b;\nqubit[1] anc;\nbit[1] out;"));
        assert!(qasm.contains("barrier a[0], b[0], anc[0];"));
        assert!(qasm.contains("cswap anc[0], a[0], b[0];"));
        assert!(qasm.contains("out[0] = measure anc[0];"));
    }

    #[test]
    fn test_emit_loose_wires() {
        let mut circuit = Circuit::with_size("loose", 2, 1);
        circuit.add_qreg("r", 1).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        circuit.measure(QubitId(1), ClbitId(0)).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("qubit[1] r;\nqubit[2] _loose_q;"));
        assert!(qasm.contains("bit[1] _loose_c;"));
        assert!(qasm.contains("cx _loose_q[1], r[0];"));
        assert!(qasm.contains("_loose_c[0] = measure _loose_q[1];"));
    }

    #[test]
    fn test_emit_parameterized() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 1).unwrap();
        circuit.rx(std::f64::consts::PI / 2.0, q[0]).unwrap();
        circuit.rz(0.25, q[0]).unwrap();
        circuit
            .ry(ParameterExpression::symbol("theta"), q[0])
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("rx(pi/2) q[0];"));
        assert!(qasm.contains("rz(0.25) q[0];"));
        assert!(qasm.contains("ry(theta) q[0];"));
    }

    #[test]
    fn test_emit_extreme_constants() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 1).unwrap();
        circuit.rz(1e300, q[0]).unwrap();
        circuit.rx(-2.5e20, q[0]).unwrap();
        circuit.ry(1.5e-7, q[0]).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("rz(1e300) q[0];"));
        assert!(qasm.contains("ry(1.5e-7) q[0];"));

        let reparsed = crate::parse(&qasm).unwrap();
        let angles: Vec<f64> = reparsed
            .instructions()
            .map(|inst| match &inst.kind {
                InstructionKind::Gate(gate) => gate.kind.parameters()[0].as_f64().unwrap(),
                _ => panic!("expected a gate"),
            })
            .collect();
        assert_eq!(angles, vec![1e300, -2.5e20, 1.5e-7]);
    }

    #[test]
    fn test_emit_rejects_non_finite_constants() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut circuit = Circuit::new("test");
            let q = circuit.add_qreg("q", 1).unwrap();
            circuit.rx(value, q[0]).unwrap();

            assert!(matches!(
                emit(&circuit),
                Err(ParseError::NonFiniteParameter(_))
            ));
            assert!(emit_qasm2(&circuit).is_err());
        }
    }

    #[test]
    fn test_emit_rejects_custom_gate() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 1).unwrap();
        circuit.h(q[0]).unwrap();
        circuit.gate(CustomGate::new("layer", 1), [q[0]]).unwrap();

        let err = emit(&circuit).unwrap_err();
        assert!(matches!(err, ParseError::UndefinedCustomGate(ref n) if n == "layer"));
        assert!(err.to_string().contains("'layer' has no OpenQASM definition"));
        assert!(emit_qasm2(&circuit).is_err());
    }

    #[test]
    fn test_loose_fallback_names_stay_unique() {
        let mut circuit = Circuit::with_size("loose", 1, 0);
        assert!(circuit.add_qreg(LOOSE_QUBITS, 1).is_err());
        let r = circuit.add_qreg("r", 1).unwrap();
        circuit.cx(QubitId(0), r[0]).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert_eq!(qasm.matches("_loose_q;").count(), 1);

        let reparsed = crate::parse(&qasm).unwrap();
        assert_eq!(reparsed.qregs().count(), 1);
        assert_eq!(reparsed.num_qubits(), 2);
    }

    #[test]
    fn test_emit_empty_barrier() {
        let mut circuit = Circuit::new("empty");
        circuit.barrier_all().unwrap();
        let qasm = emit(&circuit).unwrap();
        assert!(qasm.ends_with("barrier;\n"));
    }

    #[test]
    fn test_emit_qasm2() {
        let mut circuit = swap_test_fixture();
        let a = circuit.qreg_qubits("a").unwrap()[0];
        circuit.u(0.1, 0.2, 0.3, a).unwrap();
        let qasm = emit_qasm2(&circuit).unwrap();

        assert!(qasm.starts_with("OPENQASM 2.0;\ninclude \"qelib1.inc\";"));
        assert!(qasm.contains("qreg anc[1];"));
        assert!(qasm.contains("creg out[1];"));
        assert!(qasm.contains("measure anc[0] -> out[0];"));
        assert!(qasm.contains("u3(0.1, 0.2, 0.3) a[0];"));
        assert!(!qasm.contains("qubit["));
        assert!(!qasm.contains("= measure"));
    }

    #[test]
    fn test_roundtrip_preserves_registers() {
        let circuit = swap_test_fixture();
        let reparsed = crate::parse(&emit(&circuit).unwrap()).unwrap();

        assert_eq!(
            circuit.qregs().collect::<Vec<_>>(),
            reparsed.qregs().collect::<Vec<_>>()
        );
        assert_eq!(circuit.count_ops(), reparsed.count_ops());
        assert_eq!(circuit.depth(), reparsed.depth());

        let qasm2 = emit_qasm2(&circuit).unwrap();
        let from_qasm2 = crate::parse(&qasm2).unwrap();
        assert_eq!(circuit.count_ops(), from_qasm2.count_ops());
    }
}
