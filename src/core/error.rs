use thiserror::Error;

use crate::core::ast::InstructionKind;

/// Row/column pair used when reporting matrix shapes.
pub type Shape = (usize, usize);

/// Recoverable failures raised by the algebra library and the execution engine.
///
/// None of these are fatal: they surface to whoever issued the operation or
/// instruction, and the computer stays usable afterwards.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Shape mismatch in {op}: expected {}x{}, found {}x{}", expected.0, expected.1, actual.0, actual.1)]
    ShapeMismatch {
        op: &'static str,
        expected: Shape,
        actual: Shape,
    },

    #[error("Matrix must be square, found {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Can't divide a complex number by 0")]
    DivideByZero,

    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Invalid bit-string '{bits}': {reason}")]
    InvalidBitstring { bits: String, reason: String },

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Can't access the value of register R{0}: not initialized")]
    UninitializedRegister(usize),

    #[error("Handler '{0}' is already registered")]
    HandlerAlreadyRegistered(String),

    #[error("No handler registered for instruction {0}")]
    NoHandlerForInstruction(InstructionKind),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn shape_mismatch(op: &'static str, expected: Shape, actual: Shape) -> Self {
        CoreError::ShapeMismatch { op, expected, actual }
    }
    pub fn invalid_operand(message: impl Into<String>) -> Self {
        CoreError::InvalidOperand(message.into())
    }
    pub fn invalid_bitstring(bits: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidBitstring { bits: bits.to_string(), reason: reason.into() }
    }
    pub fn out_of_range(message: impl Into<String>) -> Self {
        CoreError::IndexOutOfRange(message.into())
    }
}
