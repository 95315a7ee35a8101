//! Statement parsing.

use super::Parser;
use crate::ast::{GateCall, Operand, Selector, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qubit | Token::Bit => self.parse_declaration(),
            Token::Qreg | Token::Creg => self.parse_legacy_declaration(),
            Token::Measure => self.parse_measure(),
            Token::Reset => self.parse_reset(),
            Token::Barrier => self.parse_barrier(),
            Token::Identifier(_) => self.parse_identifier_statement(),
            other => Err(self.unexpected("statement", &other)),
        }
    }

    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => return Err(self.unexpected("string literal", &other)),
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// `qubit[n] name;` / `bit[n] name;`, size 1 when the brackets are omitted.
    fn parse_declaration(&mut self) -> ParseResult<Statement> {
        let quantum = self.consume(&Token::Qubit);
        if !quantum {
            self.expect(Token::Bit)?;
        }

        let size = if self.consume(&Token::LBracket) {
            let size = self.parse_u32()?;
            self.expect(Token::RBracket)?;
            size
        } else {
            1
        };

        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;

        Ok(if quantum {
            Statement::QubitDecl { name, size }
        } else {
            Statement::BitDecl { name, size }
        })
    }

    /// `qreg name[n];` / `creg name[n];`
    fn parse_legacy_declaration(&mut self) -> ParseResult<Statement> {
        let quantum = self.consume(&Token::Qreg);
        if !quantum {
            self.expect(Token::Creg)?;
        }

        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let size = self.parse_u32()?;
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;

        Ok(if quantum {
            Statement::QubitDecl { name, size }
        } else {
            Statement::BitDecl { name, size }
        })
    }

    /// `measure q -> c;`
    fn parse_measure(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Measure)?;
        let qubits = self.parse_operands()?;
        self.expect(Token::Arrow)?;
        let bits = self.parse_operands()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Measure { qubits, bits })
    }

    fn parse_reset(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Reset)?;
        let qubits = self.parse_operands()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Reset { qubits })
    }

    fn parse_barrier(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Barrier)?;
        let qubits = if self.check(&Token::Semicolon) {
            vec![]
        } else {
            self.parse_operands()?
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Barrier { qubits })
    }

    /// A statement starting with an identifier: `c = measure q;` or a gate call.
    fn parse_identifier_statement(&mut self) -> ParseResult<Statement> {
        let name = self.parse_identifier()?;

        if self.check(&Token::Eq) || self.check(&Token::LBracket) {
            let target = self.parse_selector(name)?;
            self.expect(Token::Eq)?;
            self.expect(Token::Measure)?;
            let qubits = self.parse_operands()?;
            self.expect(Token::Semicolon)?;
            return Ok(Statement::Measure {
                qubits,
                bits: vec![target],
            });
        }

        self.parse_gate_call(name)
    }

    fn parse_gate_call(&mut self, name: String) -> ParseResult<Statement> {
        let params = if self.consume(&Token::LParen) {
            let p = self.parse_expression_list()?;
            self.expect(Token::RParen)?;
            p
        } else {
            vec![]
        };

        let qubits = self.parse_operands()?;
        self.expect(Token::Semicolon)?;

        Ok(Statement::Gate(GateCall {
            name,
            params,
            qubits,
        }))
    }

    fn parse_operands(&mut self) -> ParseResult<Vec<Operand>> {
        let mut refs = vec![self.parse_operand()?];
        while self.consume(&Token::Comma) {
            refs.push(self.parse_operand()?);
        }
        Ok(refs)
    }

    fn parse_operand(&mut self) -> ParseResult<Operand> {
        let register = self.parse_identifier()?;
        self.parse_selector(register)
    }

    /// The optional `[i]` or `[a:b]` following a register name.
    fn parse_selector(&mut self, register: String) -> ParseResult<Operand> {
        if !self.consume(&Token::LBracket) {
            return Ok(Operand::register(register));
        }

        let start = self.parse_u32()?;
        let selector = if self.consume(&Token::Colon) {
            let end = self.parse_u32()?;
            if end < start {
                return Err(ParseError::Generic(format!(
                    "empty range {register}[{start}:{end}]"
                )));
            }
            Selector::Range { start, end }
        } else {
            Selector::Index(start)
        };
        self.expect(Token::RBracket)?;

        Ok(Operand { register, selector })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Selector, Statement};
    use crate::parser::parse_ast;

    #[test]
    fn test_selectors() {
        let program = parse_ast("OPENQASM 3.0; barrier q, r[1], s[0:2];").unwrap();
        let Statement::Barrier { qubits } = &program.statements[0] else {
            panic!("expected barrier");
        };
        assert_eq!(qubits[0].selector, Selector::All);
        assert_eq!(qubits[1].selector, Selector::Index(1));
        assert_eq!(qubits[2].selector, Selector::Range { start: 0, end: 2 });
    }

    #[test]
    fn test_assignment_measure() {
        let program = parse_ast("OPENQASM 3.0; c[1] = measure q[0];").unwrap();
        let Statement::Measure { qubits, bits } = &program.statements[0] else {
            panic!("expected measure");
        };
        assert_eq!(qubits[0].register, "q");
        assert_eq!(bits[0].selector, Selector::Index(1));
    }

    #[test]
    fn test_declaration_forms() {
        let program = parse_ast("OPENQASM 3; qubit q; bit[4] c; qreg r[2]; creg d[1];").unwrap();
        let sizes: Vec<_> = program
            .statements
            .iter()
            .map(|s| match s {
                Statement::QubitDecl { name, size } | Statement::BitDecl { name, size } => {
                    (name.as_str(), *size)
                }
                _ => panic!("expected declaration"),
            })
            .collect();
        assert_eq!(sizes, vec![("q", 1), ("c", 4), ("r", 2), ("d", 1)]);
    }

    #[test]
    fn test_measure_requires_target() {
        assert!(parse_ast("OPENQASM 3.0; measure q;").is_err());
    }
}
