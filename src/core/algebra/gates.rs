//! Gate literals of the assembly language, materialized as matrices.
use crate::core::algebra::complex::Complex;
use crate::core::algebra::matrix::ComplexMatrix;
use crate::core::error::CoreResult;

#[inline]
fn c(r: f64) -> Complex {
    Complex::new(r, 0.0)
}

/// 2x2 Hadamard.
pub fn h() -> ComplexMatrix {
    let s = 1.0_f64 / 2.0_f64.sqrt();
    ComplexMatrix::from_raw(2, 2, vec![c(s), c(s), c(s), c(-s)])
}

/// 4x4 controlled-NOT, control on the most significant qubit.
pub fn cnot() -> ComplexMatrix {
    #[rustfmt::skip]
    let data = vec![
        c(1.0), c(0.0), c(0.0), c(0.0),
        c(0.0), c(1.0), c(0.0), c(0.0),
        c(0.0), c(0.0), c(0.0), c(1.0),
        c(0.0), c(0.0), c(1.0), c(0.0),
    ];
    ComplexMatrix::from_raw(4, 4, data)
}

/// `I<n>` literal; `I0` has no matrix.
pub fn identity(n: usize) -> CoreResult<ComplexMatrix> {
    ComplexMatrix::identity_of_size(n)
}
