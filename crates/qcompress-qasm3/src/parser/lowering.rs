//! AST-to-circuit lowering.

use qcompress_ir::{Circuit, ClbitId, ParameterExpression, QubitId, StandardGate};

use crate::ast::{BinOp, Expression, GateCall, Operand, Program, Selector, Statement};
use crate::error::{ParseError, ParseResult};
use crate::{LOOSE_CLBITS, LOOSE_QUBITS};

/// Lower a program to a circuit.
pub(crate) fn lower_to_circuit(program: &Program, name: &str) -> ParseResult<Circuit> {
    let mut lowerer = Lowerer {
        circuit: Circuit::new(name),
        loose_qubits: vec![],
        loose_clbits: vec![],
    };
    for stmt in &program.statements {
        lowerer.lower_statement(stmt)?;
    }
    Ok(lowerer.circuit)
}

struct Lowerer {
    circuit: Circuit,
    loose_qubits: Vec<QubitId>,
    loose_clbits: Vec<ClbitId>,
}

impl Lowerer {
    fn lower_statement(&mut self, stmt: &Statement) -> ParseResult<()> {
        match stmt {
            Statement::Include(_) => Ok(()),

            Statement::QubitDecl { name, size } => {
                self.check_fresh(name)?;
                if name == LOOSE_QUBITS {
                    self.loose_qubits = (0..*size).map(|_| self.circuit.add_qubit()).collect();
                } else {
                    self.circuit.add_qreg(name.clone(), *size)?;
                }
                Ok(())
            }

            Statement::BitDecl { name, size } => {
                self.check_fresh(name)?;
                if name == LOOSE_CLBITS {
                    self.loose_clbits = (0..*size).map(|_| self.circuit.add_clbit()).collect();
                } else {
                    self.circuit.add_creg(name.clone(), *size)?;
                }
                Ok(())
            }

            Statement::Gate(call) => self.lower_gate_call(call),

            Statement::Measure { qubits, bits } => {
                let q_ids = self.resolve_qubits(qubits)?;
                let c_ids = self.resolve_clbits(bits)?;
                if q_ids.len() != c_ids.len() {
                    return Err(ParseError::BroadcastMismatch {
                        statement: "measure".into(),
                        left: q_ids.len(),
                        right: c_ids.len(),
                    });
                }
                for (q, c) in q_ids.into_iter().zip(c_ids) {
                    self.circuit.measure(q, c)?;
                }
                Ok(())
            }

            Statement::Reset { qubits } => {
                for q in self.resolve_qubits(qubits)? {
                    self.circuit.reset(q)?;
                }
                Ok(())
            }

            Statement::Barrier { qubits } => {
                if qubits.is_empty() {
                    self.circuit.barrier_all()?;
                } else {
                    let q_ids = self.resolve_qubits(qubits)?;
                    self.circuit.barrier(q_ids)?;
                }
                Ok(())
            }
        }
    }

    fn check_fresh(&self, name: &str) -> ParseResult<()> {
        let taken = self.circuit.has_qreg(name)
            || self.circuit.has_creg(name)
            || (name == LOOSE_QUBITS && !self.loose_qubits.is_empty())
            || (name == LOOSE_CLBITS && !self.loose_clbits.is_empty());
        if taken {
            return Err(ParseError::DuplicateDeclaration(name.to_string()));
        }
        Ok(())
    }

    /// Apply a gate, broadcasting over whole-register and range operands.
    fn lower_gate_call(&mut self, call: &GateCall) -> ParseResult<()> {
        let params: Vec<_> = call
            .params
            .iter()
            .map(expr_to_param)
            .collect::<ParseResult<_>>()?;
        let gate = standard_gate(&call.name, params)?;

        let arity = gate.num_qubits() as usize;
        if call.qubits.len() != arity {
            return Err(ParseError::WrongQubitCount {
                gate: call.name.clone(),
                expected: arity,
                got: call.qubits.len(),
            });
        }

        let operands = call
            .qubits
            .iter()
            .map(|op| self.resolve_operand_qubits(op))
            .collect::<ParseResult<Vec<_>>>()?;

        let width = broadcast_width(&call.name, operands.iter().map(Vec::len))?;
        for i in 0..width {
            let qubits = operands
                .iter()
                .map(|ids| if ids.len() == 1 { ids[0] } else { ids[i] });
            self.circuit.gate(gate.clone(), qubits)?;
        }
        Ok(())
    }

    fn resolve_qubits(&self, refs: &[Operand]) -> ParseResult<Vec<QubitId>> {
        let mut ids = Vec::new();
        for r in refs {
            ids.extend(self.resolve_operand_qubits(r)?);
        }
        Ok(ids)
    }

    fn resolve_clbits(&self, refs: &[Operand]) -> ParseResult<Vec<ClbitId>> {
        let mut ids = Vec::new();
        for r in refs {
            let all = if r.register == LOOSE_CLBITS {
                self.loose_clbits.as_slice()
            } else {
                self.circuit
                    .creg_clbits(&r.register)
                    .map_err(|_| ParseError::UndefinedIdentifier(r.register.clone()))?
            };
            ids.extend(select(&r.register, all, r.selector)?);
        }
        Ok(ids)
    }

    fn resolve_operand_qubits(&self, r: &Operand) -> ParseResult<Vec<QubitId>> {
        let all = if r.register == LOOSE_QUBITS {
            self.loose_qubits.as_slice()
        } else {
            self.circuit
                .qreg_qubits(&r.register)
                .map_err(|_| ParseError::UndefinedIdentifier(r.register.clone()))?
        };
        select(&r.register, all, r.selector)
    }
}

/// Elements of `all` chosen by `selector`.
fn select<T: Copy>(register: &str, all: &[T], selector: Selector) -> ParseResult<Vec<T>> {
    if all.is_empty() {
        return Err(ParseError::UndefinedIdentifier(register.to_string()));
    }
    let out_of_bounds = |index: u32| ParseError::IndexOutOfBounds {
        register: register.to_string(),
        index: index as usize,
        size: all.len(),
    };
    match selector {
        Selector::All => Ok(all.to_vec()),
        Selector::Index(i) => all
            .get(i as usize)
            .map(|&id| vec![id])
            .ok_or_else(|| out_of_bounds(i)),
        Selector::Range { start, end } => all
            .get(start as usize..=end as usize)
            .map(<[T]>::to_vec)
            .ok_or_else(|| out_of_bounds(end)),
    }
}

/// Common length of multi-element operands; 1 when every operand is a single
/// element.
fn broadcast_width(gate: &str, lengths: impl Iterator<Item = usize>) -> ParseResult<usize> {
    let mut width = 1;
    for len in lengths.filter(|&len| len != 1) {
        if width != 1 && width != len {
            return Err(ParseError::BroadcastMismatch {
                statement: gate.to_string(),
                left: width,
                right: len,
            });
        }
        width = len;
    }
    Ok(width)
}

/// Map a gate name and its arguments to a standard gate.
fn standard_gate(name: &str, params: Vec<ParameterExpression>) -> ParseResult<StandardGate> {
    let lower = name.to_lowercase();
    let expected = match lower.as_str() {
        "rx" | "ry" | "rz" | "p" | "phase" | "u1" | "crz" | "cp" | "cphase" => 1,
        "u" | "u3" => 3,
        _ => 0,
    };
    if params.len() != expected {
        return Err(ParseError::WrongParameterCount {
            gate: name.to_string(),
            expected,
            got: params.len(),
        });
    }

    let mut params = params.into_iter();
    let mut next = || params.next().unwrap_or(ParameterExpression::Constant(0.0));

    Ok(match lower.as_str() {
        "id" | "i" => StandardGate::I,
        "x" => StandardGate::X,
        "y" => StandardGate::Y,
        "z" => StandardGate::Z,
        "h" => StandardGate::H,
        "s" => StandardGate::S,
        "sdg" => StandardGate::Sdg,
        "t" => StandardGate::T,
        "tdg" => StandardGate::Tdg,
        "sx" => StandardGate::SX,
        "rx" => StandardGate::Rx(next()),
        "ry" => StandardGate::Ry(next()),
        "rz" => StandardGate::Rz(next()),
        "p" | "phase" | "u1" => StandardGate::P(next()),
        "u" | "u3" => StandardGate::U(next(), next(), next()),
        "cx" | "cnot" => StandardGate::CX,
        "cy" => StandardGate::CY,
        "cz" => StandardGate::CZ,
        "swap" => StandardGate::Swap,
        "crz" => StandardGate::CRz(next()),
        "cp" | "cphase" => StandardGate::CP(next()),
        "ccx" | "toffoli" => StandardGate::CCX,
        "cswap" | "fredkin" => StandardGate::CSwap,
        _ => return Err(ParseError::UnknownGate(name.to_string())),
    })
}

/// Convert an AST expression to a parameter, folding constant sub-expressions
/// the parameter algebra cannot represent.
#[allow(clippy::cast_precision_loss)]
fn expr_to_param(expr: &Expression) -> ParseResult<ParameterExpression> {
    Ok(match expr {
        Expression::Int(v) => ParameterExpression::Constant(*v as f64),
        Expression::Float(v) => ParameterExpression::Constant(*v),
        Expression::Pi => ParameterExpression::Pi,
        Expression::Tau | Expression::Euler => constant(expr)?,
        Expression::Identifier(name) => ParameterExpression::Symbol(name.clone()),
        Expression::Neg(e) => ParameterExpression::Neg(Box::new(expr_to_param(e)?)),
        Expression::Paren(e) => expr_to_param(e)?,
        Expression::BinOp { left, op, right } => {
            let l = Box::new(expr_to_param(left)?);
            let r = Box::new(expr_to_param(right)?);
            match op {
                BinOp::Add => ParameterExpression::Add(l, r),
                BinOp::Sub => ParameterExpression::Sub(l, r),
                BinOp::Mul => ParameterExpression::Mul(l, r),
                BinOp::Div => ParameterExpression::Div(l, r),
                BinOp::Pow => constant(expr)?,
            }
        }
        Expression::FnCall { .. } => constant(expr)?,
    })
}

fn constant(expr: &Expression) -> ParseResult<ParameterExpression> {
    expr.as_f64()
        .map(ParameterExpression::Constant)
        .ok_or_else(|| {
            ParseError::Generic(format!(
                "Cannot evaluate {expr:?} with symbolic arguments"
            ))
        })
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::parse;
    use qcompress_ir::{ClbitId, QubitId};

    #[test]
    fn test_broadcast_over_registers() {
        let source = r"
            OPENQASM 3.0;
            qubit[3] a;
            qubit[3] b;
            qubit anc;
            h a;
            cswap anc, a, b;
        ";

        let circuit = parse(source).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 3);
        assert_eq!(counts["cswap"], 3);

        let last = circuit.instructions().last().unwrap();
        assert_eq!(last.qubits, vec![QubitId(6), QubitId(2), QubitId(5)]);
    }

    #[test]
    fn test_broadcast_mismatch() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] a;
            qubit[3] b;
            cx a, b;
        ";
        assert!(matches!(
            parse(source),
            Err(ParseError::BroadcastMismatch { left: 2, right: 3, .. })
        ));
    }

    #[test]
    fn test_range_operand() {
        let source = r"
            OPENQASM 3.0;
            qubit[4] q;
            x q[1:2];
        ";
        let circuit = parse(source).unwrap();
        let targets: Vec<_> = circuit.instructions().map(|i| i.qubits[0]).collect();
        assert_eq!(targets, vec![QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_index_out_of_bounds() {
        let source = "OPENQASM 3.0; qubit[2] q; h q[2];";
        assert!(matches!(
            parse(source),
            Err(ParseError::IndexOutOfBounds { index: 2, size: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_declaration_across_kinds() {
        let source = "OPENQASM 3.0; qubit[2] q; bit[2] q;";
        assert!(matches!(
            parse(source),
            Err(ParseError::DuplicateDeclaration(ref n)) if n == "q"
        ));
    }

    #[test]
    fn test_loose_declarations_become_loose_wires() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] _loose_q;
            bit[1] _loose_c;
            h _loose_q[1];
            _loose_c[0] = measure _loose_q[1];
        ";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.qregs().count(), 0);
        assert_eq!(circuit.num_qubits(), 2);
        assert!(circuit.qubits().iter().all(|q| q.slot.is_none()));

        let measure = circuit.instructions().last().unwrap();
        assert_eq!(measure.qubits, vec![QubitId(1)]);
        assert_eq!(measure.clbits, vec![ClbitId(0)]);
    }

    #[test]
    fn test_gate_errors() {
        let unknown = "OPENQASM 3.0; qubit q; frobnicate q;";
        assert!(matches!(parse(unknown), Err(ParseError::UnknownGate(_))));

        let params = "OPENQASM 3.0; qubit q; rx q;";
        assert!(matches!(
            parse(params),
            Err(ParseError::WrongParameterCount { expected: 1, got: 0, .. })
        ));

        let arity = "OPENQASM 3.0; qubit[2] q; cswap q[0], q[1];";
        assert!(matches!(
            parse(arity),
            Err(ParseError::WrongQubitCount { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_operand_is_circuit_error() {
        let source = "OPENQASM 3.0; qubit[2] q; cx q[0], q[0];";
        assert!(matches!(parse(source), Err(ParseError::CircuitError(_))));
    }
}
