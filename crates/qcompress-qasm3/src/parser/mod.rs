//! Parser for the `OpenQASM` subset.

mod expression;
mod lowering;
mod statement;

use qcompress_ir::Circuit;

use crate::ast::Program;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Name given to circuits read from source.
pub const DEFAULT_CIRCUIT_NAME: &str = "circuit";

/// Parse `OpenQASM` 3 (or 2.0) source into a circuit.
///
/// Each declaration becomes a named register of the circuit, in declaration
/// order. Declarations named `_loose_q` / `_loose_c` become loose wires.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let program = parse_ast(source)?;
    lowering::lower_to_circuit(&program, DEFAULT_CIRCUIT_NAME)
}

/// Parse source into its syntax tree without building a circuit.
pub fn parse_ast(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Parser state.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
}

impl Parser {
    fn new(source: &str) -> ParseResult<Self> {
        let tokens = tokenize(source).map_err(|e| ParseError::LexerError {
            position: e.position,
            line: e.line,
            message: e.message,
        })?;
        Ok(Self { tokens, pos: 0 })
    }

    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Line of the current token, or of the last token at end of input.
    pub(super) fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    pub(super) fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            line: self.line(),
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let line = self.line();
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(ParseError::UnexpectedToken {
                line,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume the token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_program(&mut self) -> ParseResult<Program> {
        self.expect(Token::OpenQasm)?;
        let version = self.parse_version()?;
        self.expect(Token::Semicolon)?;

        let mut statements = Vec::new();
        while !self.is_eof() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program {
            version,
            statements,
        })
    }

    fn parse_version(&mut self) -> ParseResult<String> {
        let version = match self.advance() {
            Some(Token::FloatLiteral(v)) => format!("{v:.1}"),
            Some(Token::IntLiteral(v)) => format!("{v}.0"),
            Some(other) => return Err(ParseError::InvalidVersion(other.to_string())),
            None => return Err(ParseError::UnexpectedEof("version number".into())),
        };
        match version.as_str() {
            "2.0" | "3.0" => Ok(version),
            _ => Err(ParseError::InvalidVersion(version)),
        }
    }

    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(self.unexpected("identifier", &other)),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    pub(super) fn parse_u32(&mut self) -> ParseResult<u32> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => u32::try_from(v)
                .map_err(|_| ParseError::Generic(format!("integer {v} is too large"))),
            Some(other) => Err(self.unexpected("integer", &other)),
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcompress_ir::QubitId;

    #[test]
    fn test_parse_bell_state() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] q;
            bit[2] c;
            h q[0];
            cx q[0], q[1];
            c = measure q;
        ";

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.count_ops()["measure"], 2);
        assert_eq!(circuit.name(), DEFAULT_CIRCUIT_NAME);
    }

    #[test]
    fn test_parse_keeps_registers() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] a;
            qubit[3] b;
            bit c;
            cx a[1], b[2];
        ";

        let circuit = parse(source).unwrap();
        let names: Vec<_> = circuit.qregs().map(|r| (r.name.as_str(), r.size)).collect();
        assert_eq!(names, vec![("a", 2), ("b", 3)]);
        assert_eq!(circuit.creg_clbits("c").unwrap().len(), 1);

        let cx = circuit.instructions().next().unwrap();
        assert_eq!(cx.qubits, vec![QubitId(1), QubitId(4)]);
    }

    #[test]
    fn test_parse_qasm2_registers() {
        let source = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[2];
            creg c[2];
            h q[0];
            measure q -> c;
        "#;

        let circuit = parse(source).unwrap();
        assert!(circuit.has_qreg("q"));
        assert!(circuit.has_creg("c"));
        assert_eq!(circuit.count_ops()["measure"], 2);
    }

    #[test]
    fn test_parse_parameterized() {
        let source = r"
            OPENQASM 3.0;
            qubit q;
            rx(pi/2) q;
            ry(-pi/4) q;
            rz(theta) q;
        ";

        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_parse_rejects_unknown_version() {
        let result = parse("OPENQASM 4.0;");
        assert!(matches!(result, Err(ParseError::InvalidVersion(_))));
    }

    #[test]
    fn test_parse_error_undefined() {
        let source = r"
            OPENQASM 3.0;
            h undefined[0];
        ";

        let result = parse(source);
        assert!(matches!(result, Err(ParseError::UndefinedIdentifier(ref n)) if n == "undefined"));
    }

    #[test]
    fn test_unexpected_token_reports_line() {
        let source = "OPENQASM 3.0;\nqubit[2] q;\nh q[0]\n";
        match parse(source) {
            Err(ParseError::UnexpectedEof(_)) => {}
            other => panic!("expected end of input error, got {other:?}"),
        }

        let source = "OPENQASM 3.0;\nqubit[2] q;\nh q[0] q[1];\n";
        match parse(source) {
            Err(ParseError::UnexpectedToken { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected unexpected-token error, got {other:?}"),
        }
    }
}
