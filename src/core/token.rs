// src/core/token.rs
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Register(usize),       // R<digits>
    IdentityMatrix(usize), // I<digits>
    BitString(String),     // [0101]
    Digit(usize),
    Variable(String),

    // Operation keywords
    Initialize,
    Select,
    Apply,
    Concat,
    Tensor,
    Measure,
    Inverse,

    // Gate keywords
    Cnot,
    H,

    // Special
    EOF,
}

impl TokenKind {
    /// Reserved words, checked before an identifier becomes a variable name.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "INITIALIZE" => TokenKind::Initialize,
            "SELECT" => TokenKind::Select,
            "APPLY" => TokenKind::Apply,
            "CONCAT" => TokenKind::Concat,
            "TENSOR" => TokenKind::Tensor,
            "MEASURE" => TokenKind::Measure,
            "INVERSE" => TokenKind::Inverse,
            "CNOT" => TokenKind::Cnot,
            "H" => TokenKind::H,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

// Token class names, as used in parser messages
impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Register(_) => "REGISTER",
            TokenKind::IdentityMatrix(_) => "IDENTITY_MATRIX",
            TokenKind::BitString(_) => "BITSTRING",
            TokenKind::Digit(_) => "DIGIT",
            TokenKind::Variable(_) => "VARIABLE",
            TokenKind::Initialize => "INITIALIZE",
            TokenKind::Select => "SELECT",
            TokenKind::Apply => "APPLY",
            TokenKind::Concat => "CONCAT",
            TokenKind::Tensor => "TENSOR",
            TokenKind::Measure => "MEASURE",
            TokenKind::Inverse => "INVERSE",
            TokenKind::Cnot => "CNOT",
            TokenKind::H => "H",
            TokenKind::EOF => "end of input",
        };
        write!(f, "{}", name)
    }
}

// Full token (kind plus value) for token dumps
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Register(n) | TokenKind::IdentityMatrix(n) | TokenKind::Digit(n) => {
                write!(f, "{}({}) @{}:{}", self.kind, n, self.line, self.column)
            }
            TokenKind::BitString(bits) => write!(f, "BITSTRING(\"{}\") @{}:{}", bits, self.line, self.column),
            TokenKind::Variable(name) => write!(f, "VARIABLE('{}') @{}:{}", name, self.line, self.column),
            other => write!(f, "{} @{}:{}", other, self.line, self.column),
        }
    }
}
