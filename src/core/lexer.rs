// lexer.rs
//! Single-pass tokenizer for the quantum assembler language.
//!
//! Lexing is best-effort: a bad character or malformed literal is recorded as
//! a [`LexerError`], logged, skipped, and tokenizing carries on with the rest
//! of the input.

use std::fmt;

use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::core::token::{Token, TokenKind};

/// Lexer error types with location.
#[derive(Debug, Clone, PartialEq)]
pub enum LexerError {
    UnexpectedCharacter(char, usize, usize),
    InvalidNumber(String, usize, usize),
}

impl LexerError {
    pub fn position(&self) -> (usize, usize) {
        use LexerError::*;
        match self {
            UnexpectedCharacter(_, line, col)
            | InvalidNumber(_, line, col) => (*line, *col),
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LexerError::*;
        match self {
            UnexpectedCharacter(ch, line, col) => write!(f, "Illegal character '{}' at {}:{}", ch, line, col),
            InvalidNumber(num, line, col) => write!(f, "Invalid number literal '{}' at {}:{}", num, line, col),
        }
    }
}
impl std::error::Error for LexerError {}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    diagnostics: Vec<LexerError>,
    consumed_eof: bool, // Prevent repeated EOF tokens
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars = input.nfc().collect();
        Self {
            chars,
            pos: 0,
            line: 1,
            col: 1,
            diagnostics: Vec::new(),
            consumed_eof: false,
        }
    }

    /// Problems reported so far; none of them stopped tokenizing.
    pub fn diagnostics(&self) -> &[LexerError] {
        &self.diagnostics
    }

    #[inline]
    fn pos(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    #[inline]
    fn advance_char(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.advance_char();
        }
        out
    }

    /// Next token, or `None` once EOF has been handed out.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.consumed_eof {
            return None;
        }
        loop {
            match self.scan() {
                Ok(Some(token)) => {
                    debug!("token {}", token);
                    if token.kind == TokenKind::EOF {
                        self.consumed_eof = true;
                    }
                    return Some(token);
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!("{}", e);
                    self.diagnostics.push(e);
                }
            }
        }
    }

    /// Tokenizes the entire input; the last token is always EOF.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    // Ok(None): something was consumed without producing a token.
    fn scan(&mut self) -> Result<Option<Token>, LexerError> {
        let (line, col) = self.pos();
        let Some(ch) = self.current() else {
            return Ok(Some(Token::new(TokenKind::EOF, String::new(), line, col)));
        };

        if matches!(ch, ' ' | '\t' | '\r' | '\n') {
            self.advance_char();
            return Ok(None);
        }
        if ch == '[' {
            return self.lex_bitstring().map(Some);
        }
        if ch.is_ascii_digit() {
            let digits = self.take_while(|c| c.is_ascii_digit());
            let value = digits
                .parse::<usize>()
                .map_err(|_| LexerError::InvalidNumber(digits.clone(), line, col))?;
            return Ok(Some(Token::new(TokenKind::Digit(value), digits, line, col)));
        }
        if is_identifier_start(ch) {
            return self.lex_identifier().map(Some);
        }

        self.advance_char();
        Err(LexerError::UnexpectedCharacter(ch, line, col))
    }

    // A '[' that does not open `[01...]` on the same line is an illegal
    // character on its own; scanning resumes right after it.
    fn lex_bitstring(&mut self) -> Result<Token, LexerError> {
        let (line, col) = self.pos();
        let start = self.pos + 1;
        let len = self.chars[start..].iter().take_while(|c| matches!(**c, '0' | '1')).count();
        if len == 0 || self.chars.get(start + len) != Some(&']') {
            self.advance_char();
            return Err(LexerError::UnexpectedCharacter('[', line, col));
        }
        self.advance_char(); // consume '['
        let inner = self.take_while(|c| c == '0' || c == '1');
        self.advance_char(); // consume ']'
        let lexeme = format!("[{}]", inner);
        Ok(Token::new(TokenKind::BitString(inner), lexeme, line, col))
    }

    fn lex_identifier(&mut self) -> Result<Token, LexerError> {
        let (line, col) = self.pos();
        let ident = self.take_while(is_identifier_part);

        // Keyword matching - case-sensitive, reserved
        if let Some(kind) = TokenKind::keyword(&ident) {
            return Ok(Token::new(kind, ident, line, col));
        }

        // R<digits> and I<digits> literals
        let numbered = |prefix: char| {
            ident
                .strip_prefix(prefix)
                .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        };
        let kind = if let Some(digits) = numbered('R') {
            TokenKind::Register(parse_index(digits, &ident, line, col)?)
        } else if let Some(digits) = numbered('I') {
            TokenKind::IdentityMatrix(parse_index(digits, &ident, line, col)?)
        } else {
            TokenKind::Variable(ident.clone())
        };
        Ok(Token::new(kind, ident, line, col))
    }
}

/// One-shot: tokens plus the diagnostics reported along the way.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexerError>) {
    let mut lexer = Lexer::new(input);
    let tokens = lexer.tokenize();
    (tokens, lexer.diagnostics)
}

fn parse_index(digits: &str, lexeme: &str, line: usize, col: usize) -> Result<usize, LexerError> {
    digits
        .parse::<usize>()
        .map_err(|_| LexerError::InvalidNumber(lexeme.to_string(), line, col))
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}
fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}
