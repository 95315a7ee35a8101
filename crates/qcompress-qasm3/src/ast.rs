//! Abstract syntax tree for the `OpenQASM` subset.

use serde::{Deserialize, Serialize};

/// A complete program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Version string, e.g. "3.0" or "2.0".
    pub version: String,
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

/// A statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// `include "file";`
    Include(String),

    /// `qubit[n] name;`, `qubit name;` or `qreg name[n];`
    QubitDecl { name: String, size: u32 },

    /// `bit[n] name;`, `bit name;` or `creg name[n];`
    BitDecl { name: String, size: u32 },

    /// Gate application.
    Gate(GateCall),

    /// `measure q -> c;` or `c = measure q;`
    Measure {
        qubits: Vec<Operand>,
        bits: Vec<Operand>,
    },

    /// `reset q;`
    Reset { qubits: Vec<Operand> },

    /// `barrier q;` or `barrier;`
    Barrier { qubits: Vec<Operand> },
}

/// A gate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate name as written.
    pub name: String,
    /// Angle arguments.
    pub params: Vec<Expression>,
    /// Operands, possibly whole registers to broadcast over.
    pub qubits: Vec<Operand>,
}

/// Which elements of a register an operand selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// The whole register: `q`.
    All,
    /// One element: `q[i]`.
    Index(u32),
    /// An inclusive range: `q[a:b]`.
    Range { start: u32, end: u32 },
}

/// A register reference used as a gate, measure, reset or barrier operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    /// Register name.
    pub register: String,
    /// Selected elements.
    pub selector: Selector,
}

impl Operand {
    /// Reference a single element.
    pub fn single(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            selector: Selector::Index(index),
        }
    }

    /// Reference an entire register.
    pub fn register(register: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            selector: Selector::All,
        }
    }
}

/// An angle expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal.
    Int(u64),
    /// Float literal.
    Float(f64),
    /// Free parameter name.
    Identifier(String),
    /// Pi constant.
    Pi,
    /// Tau constant (2π).
    Tau,
    /// Euler's number.
    Euler,
    /// Negation.
    Neg(Box<Expression>),
    /// Binary operation.
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    /// Built-in function call such as `sin(x)`.
    FnCall { name: String, args: Vec<Expression> },
    /// Parenthesized expression.
    Paren(Box<Expression>),
}

impl Expression {
    /// Evaluate to a constant, if the expression has no free parameters.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Expression::Int(v) => Some(*v as f64),
            Expression::Float(v) => Some(*v),
            Expression::Pi => Some(std::f64::consts::PI),
            Expression::Tau => Some(std::f64::consts::TAU),
            Expression::Euler => Some(std::f64::consts::E),
            Expression::Identifier(_) => None,
            Expression::Neg(e) => e.as_f64().map(|v| -v),
            Expression::BinOp { left, op, right } => {
                let l = left.as_f64()?;
                let r = right.as_f64()?;
                Some(match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                })
            }
            Expression::FnCall { name, args } => {
                let [arg] = args.as_slice() else {
                    return None;
                };
                let x = arg.as_f64()?;
                match name.as_str() {
                    "sin" => Some(x.sin()),
                    "cos" => Some(x.cos()),
                    "tan" => Some(x.tan()),
                    "exp" => Some(x.exp()),
                    "ln" => Some(x.ln()),
                    "sqrt" => Some(x.sqrt()),
                    _ => None,
                }
            }
            Expression::Paren(e) => e.as_f64(),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}
