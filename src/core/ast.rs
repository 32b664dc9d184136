// src/core/ast.rs
//! Instruction model: the closed set of assembler instructions and their
//! strongly-typed operands. Values are immutable once parsed.

use std::fmt;

use serde::Serialize;

use crate::core::algebra::{gates, ComplexMatrix};
use crate::core::error::CoreResult;

/// Register operand, `R<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Register(pub usize);

/// Bit-string operand, the digits inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitString(pub String);

/// Bare integer operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Digit(pub usize);

/// Free variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Variable(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gate {
    Cnot,
    H,
    Identity(usize),
}

impl Gate {
    pub fn matrix(&self) -> CoreResult<ComplexMatrix> {
        match self {
            Gate::Cnot => Ok(gates::cnot()),
            Gate::H => Ok(gates::h()),
            Gate::Identity(n) => gates::identity(*n),
        }
    }
}

/// Anything usable where the grammar expects a `matrix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatrixRef {
    Gate(Gate),
    Variable(Variable),
    Register(Register),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Initialize {
    pub register: Register,
    pub bitstring: Option<BitString>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Select {
    pub variable: Variable,
    pub register: Register,
    pub offset: Digit,
    pub count: Digit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Apply {
    pub matrix: MatrixRef,
    pub register: Register,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concat {
    pub variable: Variable,
    pub left: MatrixRef,
    pub right: MatrixRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tensor {
    pub variable: Variable,
    pub left: MatrixRef,
    pub right: MatrixRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measure {
    pub register: Register,
    pub variable: Variable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inverse {
    pub variable: Variable,
    pub matrix: MatrixRef,
}

/// One parsed assembler statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Instruction {
    Initialize(Initialize),
    Select(Select),
    Apply(Apply),
    Concat(Concat),
    Tensor(Tensor),
    Measure(Measure),
    Inverse(Inverse),
}

/// Variant tag of an [`Instruction`], used as the handler-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum InstructionKind {
    Initialize,
    Select,
    Apply,
    Concat,
    Tensor,
    Measure,
    Inverse,
}

impl InstructionKind {
    pub const ALL: [InstructionKind; 7] = [
        InstructionKind::Initialize,
        InstructionKind::Select,
        InstructionKind::Apply,
        InstructionKind::Concat,
        InstructionKind::Tensor,
        InstructionKind::Measure,
        InstructionKind::Inverse,
    ];
}

impl Instruction {
    // Utility constructors
    pub fn initialize(register: usize, bitstring: Option<&str>) -> Self {
        Instruction::Initialize(Initialize {
            register: Register(register),
            bitstring: bitstring.map(|b| BitString(b.to_string())),
        })
    }
    pub fn select(variable: &str, register: usize, offset: usize, count: usize) -> Self {
        Instruction::Select(Select {
            variable: Variable(variable.to_string()),
            register: Register(register),
            offset: Digit(offset),
            count: Digit(count),
        })
    }

    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Initialize(_) => InstructionKind::Initialize,
            Instruction::Select(_) => InstructionKind::Select,
            Instruction::Apply(_) => InstructionKind::Apply,
            Instruction::Concat(_) => InstructionKind::Concat,
            Instruction::Tensor(_) => InstructionKind::Tensor,
            Instruction::Measure(_) => InstructionKind::Measure,
            Instruction::Inverse(_) => InstructionKind::Inverse,
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R[{}]", self.0)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Var[{}]", self.0)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Cnot => write!(f, "CNOT"),
            Gate::H => write!(f, "H"),
            Gate::Identity(n) => write!(f, "I{}", n),
        }
    }
}

impl fmt::Display for MatrixRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixRef::Gate(g) => write!(f, "{}", g),
            MatrixRef::Variable(v) => write!(f, "{}", v),
            MatrixRef::Register(r) => write!(f, "{}", r),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Initialize(i) => {
                write!(f, "Initialize {}", i.register)?;
                if let Some(bits) = &i.bitstring {
                    write!(f, " with value '{}'", bits.0)?;
                }
                Ok(())
            }
            Instruction::Select(s) => write!(
                f,
                "Select {} elements of {} from {} into {}",
                s.count.0, s.register, s.offset.0, s.variable
            ),
            Instruction::Apply(a) => write!(f, "Apply {} to {}", a.matrix, a.register),
            Instruction::Concat(c) => write!(f, "Concat {} and {} into {}", c.left, c.right, c.variable),
            Instruction::Tensor(t) => write!(f, "Tensor {} with {} into {}", t.left, t.right, t.variable),
            Instruction::Measure(m) => write!(f, "Measure {} into {}", m.register, m.variable),
            Instruction::Inverse(i) => write!(f, "Invert {} into {}", i.matrix, i.variable),
        }
    }
}
