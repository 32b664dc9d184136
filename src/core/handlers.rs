//! Instruction handlers: the runtime semantics plugged into a [`Computer`].
//!
//! A handler declares which instruction variants it wants and is handed each
//! matching instruction together with exclusive access to the computer state.
//! Several handlers may be registered for the same variant (a tracing handler
//! next to a state-mutating one, for instance); they run in registration order.
//!
//! [`Computer`]: crate::core::computer::Computer

use log::info;

use crate::core::algebra::{Complex, ComplexMatrix};
use crate::core::ast::{Initialize, Instruction, InstructionKind, Select};
use crate::core::computer::ComputerState;
use crate::core::error::{CoreError, CoreResult};

pub trait InstructionHandler: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Closed set of variants this handler wants to see.
    fn handled_instructions(&self) -> &[InstructionKind];

    fn execute(&self, instruction: &Instruction, state: &mut ComputerState) -> CoreResult<()>;
}

fn wrong_variant(handler: &str, instruction: &Instruction) -> CoreError {
    CoreError::invalid_operand(format!("{} can't handle {} instructions", handler, instruction.kind()))
}

/// `INITIALIZE R<n> [bits]`: zero matrix, or the bit-string reshaped row-major.
#[derive(Debug, Default)]
pub struct InitializeHandler;

impl InstructionHandler for InitializeHandler {
    fn name(&self) -> &str {
        "InitializeHandler"
    }

    fn handled_instructions(&self) -> &[InstructionKind] {
        &[InstructionKind::Initialize]
    }

    fn execute(&self, instruction: &Instruction, state: &mut ComputerState) -> CoreResult<()> {
        let Instruction::Initialize(Initialize { register, bitstring }) = instruction else {
            return Err(wrong_variant(self.name(), instruction));
        };
        let side = state.side();
        let value = match bitstring {
            None => ComplexMatrix::zeros(side, side)?,
            Some(bits) => bitstring_to_matrix(&bits.0, side)?,
        };
        state.register_mut(register.0)?.initialize(value);
        info!("initialized R{}", register.0);
        Ok(())
    }
}

/// `SELECT <var> R<n> <offset> <count>`: copies a slice of the flattened
/// register into a 1×count variable.
#[derive(Debug, Default)]
pub struct SelectHandler;

impl InstructionHandler for SelectHandler {
    fn name(&self) -> &str {
        "SelectHandler"
    }

    fn handled_instructions(&self) -> &[InstructionKind] {
        &[InstructionKind::Select]
    }

    fn execute(&self, instruction: &Instruction, state: &mut ComputerState) -> CoreResult<()> {
        let Instruction::Select(Select { variable, register, offset, count }) = instruction else {
            return Err(wrong_variant(self.name(), instruction));
        };
        let reg = state.register(register.0)?;
        let size = reg.size();
        let start = offset.0;
        let stop = start
            .checked_add(count.0)
            .filter(|&stop| count.0 > 0 && stop <= size)
            .ok_or_else(|| {
                CoreError::out_of_range(format!(
                    "unable to select {} elements from element {} of R{} ({} elements)",
                    count.0, start, register.0, size
                ))
            })?;
        let selected = reg.value()?.as_slice()[start..stop].to_vec();
        let value = ComplexMatrix::from_flat(1, selected.len(), selected)?;
        info!("selected R{}[{}..{}] into {}", register.0, start, stop, variable.0);
        state.set_variable(&variable.0, value);
        Ok(())
    }
}

/// Diagnostic pass-through: logs every instruction it is given.
#[derive(Debug, Default)]
pub struct TraceHandler;

impl InstructionHandler for TraceHandler {
    fn name(&self) -> &str {
        "TraceHandler"
    }

    fn handled_instructions(&self) -> &[InstructionKind] {
        &InstructionKind::ALL
    }

    fn execute(&self, instruction: &Instruction, _state: &mut ComputerState) -> CoreResult<()> {
        info!("Executing instruction: '{}'", instruction);
        Ok(())
    }
}

/// Reshapes a `side²`-long string of `0`/`1` into a `side`x`side` matrix, row-major.
pub fn bitstring_to_matrix(bits: &str, side: usize) -> CoreResult<ComplexMatrix> {
    let expected = side * side;
    if bits.chars().count() != expected {
        return Err(CoreError::invalid_bitstring(
            bits,
            format!("expected {} bits, found {}", expected, bits.chars().count()),
        ));
    }
    let data = bits
        .chars()
        .map(|c| match c {
            '0' => Ok(Complex::ZERO),
            '1' => Ok(Complex::ONE),
            other => Err(CoreError::invalid_bitstring(bits, format!("'{}' is not a binary digit", other))),
        })
        .collect::<CoreResult<Vec<_>>>()?;
    ComplexMatrix::from_flat(side, side, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshapes_row_major() {
        let m = bitstring_to_matrix("1000", 2).unwrap();
        assert_eq!(m, ComplexMatrix::new(2, 2, vec![vec![1, 0], vec![0, 0]]).unwrap());
    }

    #[test]
    fn rejects_non_binary_digits() {
        let err = bitstring_to_matrix("1021", 2).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBitstring { .. }));
    }
}
