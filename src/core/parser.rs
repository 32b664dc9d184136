//! Grammar-driven parser: one line of tokens in, one [`Instruction`] out.
//!
//! ```text
//! instruction   := op_initialize | op_select | op_apply | op_concat
//!                | op_tensor | op_measure | op_inverse
//! op_initialize := INITIALIZE register [bitstring]
//! op_select     := SELECT variable register digit digit
//! op_apply      := APPLY matrix register
//! op_concat     := variable CONCAT matrix matrix
//! op_tensor     := variable TENSOR matrix matrix
//! op_measure    := MEASURE register variable
//! op_inverse    := variable INVERSE matrix
//! matrix        := gate | variable | register
//! gate          := CNOT | H | identity_matrix
//! ```
//!
//! No semantic validation happens here; register bounds and bit-string
//! lengths are checked when the instruction executes.

use crate::core::ast::{
    Apply, BitString, Concat, Digit, Gate, Initialize, Instruction, Inverse, MatrixRef, Measure,
    Register, Select, Tensor, Variable,
};
use crate::core::lexer::{self, Lexer, LexerError};
use crate::core::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.message, self.line, self.column)
    }
}

impl std::error::Error for ParserError {}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create new parser instance; ensure trailing EOF token present
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = match tokens.last() {
            Some(t) => !matches!(t.kind, TokenKind::EOF),
            None => true,
        };
        if needs_eof {
            let (line, column) = tokens.last().map(|t| (t.line, t.column + t.lexeme.len())).unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::EOF, String::new(), line, column));
        }
        Parser { tokens, pos: 0 }
    }

    /// Parses exactly one instruction; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Instruction, ParserError> {
        let instruction = self.parse_instruction()?;
        if !self.is_at_end() {
            let tok = self.peek();
            return Err(self.err_at(tok, &format!("Unexpected {} after instruction", tok.kind)));
        }
        Ok(instruction)
    }

    fn parse_instruction(&mut self) -> Result<Instruction, ParserError> {
        match self.peek().kind.clone() {
            TokenKind::Initialize => self.parse_initialize(),
            TokenKind::Select => self.parse_select(),
            TokenKind::Apply => self.parse_apply(),
            TokenKind::Measure => self.parse_measure(),
            TokenKind::Variable(_) => self.parse_assignment(),
            TokenKind::EOF => Err(self.err_here("Expected an instruction")),
            other => Err(self.err_here(&format!("Expected an instruction, found {}", other))),
        }
    }

    fn parse_initialize(&mut self) -> Result<Instruction, ParserError> {
        self.consume(TokenKind::Initialize, "Expected 'INITIALIZE'")?;
        let register = self.parse_register("Expected register after INITIALIZE")?;
        let bitstring = match self.peek().kind.clone() {
            TokenKind::BitString(bits) => {
                self.advance();
                Some(BitString(bits))
            }
            _ => None,
        };
        Ok(Instruction::Initialize(Initialize { register, bitstring }))
    }

    fn parse_select(&mut self) -> Result<Instruction, ParserError> {
        self.consume(TokenKind::Select, "Expected 'SELECT'")?;
        let variable = self.parse_variable("Expected variable after SELECT")?;
        let register = self.parse_register("Expected register to select from")?;
        let offset = self.parse_digit("Expected offset")?;
        let count = self.parse_digit("Expected element count")?;
        Ok(Instruction::Select(Select { variable, register, offset, count }))
    }

    fn parse_apply(&mut self) -> Result<Instruction, ParserError> {
        self.consume(TokenKind::Apply, "Expected 'APPLY'")?;
        let matrix = self.parse_matrix()?;
        let register = self.parse_register("Expected target register")?;
        Ok(Instruction::Apply(Apply { matrix, register }))
    }

    fn parse_measure(&mut self) -> Result<Instruction, ParserError> {
        self.consume(TokenKind::Measure, "Expected 'MEASURE'")?;
        let register = self.parse_register("Expected register after MEASURE")?;
        let variable = self.parse_variable("Expected result variable")?;
        Ok(Instruction::Measure(Measure { register, variable }))
    }

    // variable CONCAT matrix matrix | variable TENSOR matrix matrix | variable INVERSE matrix
    fn parse_assignment(&mut self) -> Result<Instruction, ParserError> {
        let variable = self.parse_variable("Expected variable")?;
        match self.peek().kind.clone() {
            TokenKind::Concat => {
                self.advance();
                let left = self.parse_matrix()?;
                let right = self.parse_matrix()?;
                Ok(Instruction::Concat(Concat { variable, left, right }))
            }
            TokenKind::Tensor => {
                self.advance();
                let left = self.parse_matrix()?;
                let right = self.parse_matrix()?;
                Ok(Instruction::Tensor(Tensor { variable, left, right }))
            }
            TokenKind::Inverse => {
                self.advance();
                let matrix = self.parse_matrix()?;
                Ok(Instruction::Inverse(Inverse { variable, matrix }))
            }
            _ => Err(self.err_here("Expected CONCAT, TENSOR or INVERSE after variable")),
        }
    }

    fn parse_matrix(&mut self) -> Result<MatrixRef, ParserError> {
        let matrix = match self.peek().kind.clone() {
            TokenKind::Cnot => MatrixRef::Gate(Gate::Cnot),
            TokenKind::H => MatrixRef::Gate(Gate::H),
            TokenKind::IdentityMatrix(n) => MatrixRef::Gate(Gate::Identity(n)),
            TokenKind::Variable(name) => MatrixRef::Variable(Variable(name)),
            TokenKind::Register(n) => MatrixRef::Register(Register(n)),
            _ => return Err(self.err_here("Expected a gate, variable or register")),
        };
        self.advance();
        Ok(matrix)
    }

    fn parse_register(&mut self, msg: &str) -> Result<Register, ParserError> {
        match self.peek().kind {
            TokenKind::Register(n) => {
                self.advance();
                Ok(Register(n))
            }
            _ => Err(self.err_here(msg)),
        }
    }

    fn parse_variable(&mut self, msg: &str) -> Result<Variable, ParserError> {
        match self.peek().kind.clone() {
            TokenKind::Variable(name) => {
                self.advance();
                Ok(Variable(name))
            }
            _ => Err(self.err_here(msg)),
        }
    }

    fn parse_digit(&mut self, msg: &str) -> Result<Digit, ParserError> {
        match self.peek().kind {
            TokenKind::Digit(n) => {
                self.advance();
                Ok(Digit(n))
            }
            _ => Err(self.err_here(msg)),
        }
    }

    // Helpers

    fn consume(&mut self, kind: TokenKind, msg: &str) -> Result<&Token, ParserError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.err_here(msg))
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && &self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::EOF)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn err_here(&self, msg: &str) -> ParserError {
        let tok = self.peek();
        let message = if tok.kind == TokenKind::EOF {
            format!("{}, found end of input", msg)
        } else {
            msg.to_string()
        };
        ParserError { message, line: tok.line, column: tok.column }
    }

    fn err_at(&self, tok: &Token, msg: &str) -> ParserError {
        ParserError { message: msg.to_string(), line: tok.line, column: tok.column }
    }
}

/// One-shot: lex + parse a single line. Lexer diagnostics are logged and the
/// offending characters skipped; only a grammar failure yields an error.
pub fn parse_line(source: &str) -> Result<Instruction, ParserError> {
    let tokens = Lexer::new(source).tokenize();
    Parser::new(tokens).parse()
}

/// Like [`parse_line`], also handing back what the lexer reported and skipped.
pub fn parse_line_with_diagnostics(source: &str) -> (Result<Instruction, ParserError>, Vec<LexerError>) {
    let (tokens, diagnostics) = lexer::tokenize(source);
    (Parser::new(tokens).parse(), diagnostics)
}
