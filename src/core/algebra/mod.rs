//! Complex scalars and matrices used by the instruction handlers.

pub mod complex;
pub mod gates;
pub mod matrix;
pub mod observe;

pub use complex::Complex;
pub use matrix::ComplexMatrix;
