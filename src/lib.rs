//! Quantum assembler simulator.
//!
//! ```
//! use qsim::core::computer::Computer;
//! use qsim::core::parser::parse_line;
//!
//! let mut computer = Computer::with_default_handlers(3, 4, false).unwrap();
//! let instruction = parse_line("INITIALIZE R0 [101100010]").unwrap();
//! computer.execute(&instruction).unwrap();
//! computer.execute(&parse_line("SELECT V1 R0 0 9").unwrap()).unwrap();
//! assert!(computer.variables().contains_key("V1"));
//! ```
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod shell;

pub use crate::core::algebra::{Complex, ComplexMatrix};
pub use crate::core::ast::{Instruction, InstructionKind};
pub use crate::core::computer::Computer;
pub use crate::core::error::{CoreError, CoreResult};
pub use crate::core::handlers::InstructionHandler;
pub use crate::core::parser::parse_line;
pub use crate::core::token::TokenKind;
