//! Core module tree: algebra, assembler front end, and execution engine.
//!
//! Pipeline: source line → Lexer → tokens → Parser → Instruction → Computer
//! (dispatch to registered handlers) → registers / variables.

pub mod algebra;
pub mod ast;
pub mod computer;
pub mod diagnostics;
pub mod error;
pub mod handlers;
pub mod lexer;
pub mod parser;
pub mod token;

pub use token::TokenKind;
