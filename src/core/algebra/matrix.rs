#![allow(clippy::needless_range_loop)]
//! Rectangular matrices of [`Complex`] scalars.
//!
//! Every operation returns a new matrix. Shape errors always report the
//! expected and the actual shape. Equality is exact: callers comparing
//! irrational-valued results (unitarity after rotations, for instance) must
//! round first.

use std::fmt;
use std::ops::Index;

use crate::core::algebra::complex::Complex;
use crate::core::error::{CoreError, CoreResult, Shape};

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex>, // row-major
}

impl ComplexMatrix {
    /// Builds a `rows`x`cols` matrix from a grid of scalar-convertible values.
    pub fn new<T: Into<Complex>>(rows: usize, cols: usize, grid: Vec<Vec<T>>) -> CoreResult<Self> {
        let actual_cols = grid.first().map(|r| r.len()).unwrap_or(0);
        if rows == 0 || cols == 0 || grid.len() != rows {
            return Err(CoreError::shape_mismatch("construct", (rows, cols), (grid.len(), actual_cols)));
        }
        if let Some(bad) = grid.iter().find(|row| row.len() != cols) {
            return Err(CoreError::shape_mismatch("construct", (rows, cols), (grid.len(), bad.len())));
        }
        let data = grid.into_iter().flatten().map(Into::into).collect();
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a row-major flat sequence of `rows * cols` scalars.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<Complex>) -> CoreResult<Self> {
        if rows == 0 || cols == 0 || data.len() != rows * cols {
            let actual = (data.len() / cols.max(1), cols);
            return Err(CoreError::shape_mismatch("construct", (rows, cols), actual));
        }
        Ok(Self { rows, cols, data })
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<Complex>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Self { rows, cols, data }
    }

    pub fn zeros(rows: usize, cols: usize) -> CoreResult<Self> {
        Self::from_flat(rows, cols, vec![Complex::ZERO; rows * cols])
    }

    pub fn column_vector<T: Into<Complex>>(values: Vec<T>) -> CoreResult<Self> {
        let n = values.len();
        Self::from_flat(n, 1, values.into_iter().map(Into::into).collect())
    }

    pub fn row_vector<T: Into<Complex>>(values: Vec<T>) -> CoreResult<Self> {
        let n = values.len();
        Self::from_flat(1, n, values.into_iter().map(Into::into).collect())
    }

    /// `n`x`n` identity.
    pub fn identity_of_size(n: usize) -> CoreResult<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = Complex::ONE;
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn shape(&self) -> Shape { (self.rows, self.cols) }

    pub fn get(&self, row: usize, col: usize) -> Option<Complex> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Complex]> {
        (row < self.rows).then(|| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Row-major iteration over every element.
    pub fn iter(&self) -> impl Iterator<Item = &Complex> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[Complex] {
        &self.data
    }

    pub fn map(&self, f: impl Fn(Complex) -> Complex) -> Self {
        Self { rows: self.rows, cols: self.cols, data: self.data.iter().map(|z| f(*z)).collect() }
    }

    fn zip_with(&self, other: &Self, op: &'static str, f: impl Fn(Complex, Complex) -> Complex) -> CoreResult<Self> {
        if self.shape() != other.shape() {
            return Err(CoreError::shape_mismatch(op, self.shape(), other.shape()));
        }
        let data = self.data.iter().zip(&other.data).map(|(a, b)| f(*a, *b)).collect();
        Ok(Self { rows: self.rows, cols: self.cols, data })
    }

    // Elementwise sum; shapes must match
    pub fn add(&self, other: &Self) -> CoreResult<Self> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    // Elementwise difference; shapes must match
    pub fn subtract(&self, other: &Self) -> CoreResult<Self> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    pub fn negate(&self) -> Self {
        self.map(|z| -z)
    }

    pub fn scale(&self, factor: Complex) -> Self {
        self.map(|z| factor * z)
    }

    /// Matrix product; requires `self.cols == other.rows`.
    pub fn multiply(&self, other: &Self) -> CoreResult<Self> {
        if self.cols != other.rows {
            return Err(CoreError::shape_mismatch("multiply", self.shape(), other.shape()));
        }
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                data.push((0..self.cols).map(|k| self.data[i * self.cols + k] * other.data[k * other.cols + j]).sum());
            }
        }
        Ok(Self { rows: self.rows, cols: other.cols, data })
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Self { rows: self.cols, cols: self.rows, data }
    }

    pub fn conjugate(&self) -> Self {
        self.map(|z| z.conjugate())
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        self.conjugate().transpose()
    }

    pub fn trace(&self) -> CoreResult<Complex> {
        if !self.is_square() {
            return Err(CoreError::NotSquare { rows: self.rows, cols: self.cols });
        }
        Ok((0..self.rows).map(|i| self.data[i * self.cols + i]).sum())
    }

    /// Identity with the same size as `self`; absent for non-square matrices.
    pub fn identity(&self) -> Option<Self> {
        if self.is_square() {
            Self::identity_of_size(self.rows).ok()
        } else {
            None
        }
    }

    /// `trace(A† B)` for vectors, `trace(Aᵗ B)` for same-size square matrices.
    pub fn inner_product(&self, other: &Self) -> CoreResult<Complex> {
        if self.is_vector() && other.is_vector() {
            if self.rows != other.rows {
                return Err(CoreError::shape_mismatch("inner_product", self.shape(), other.shape()));
            }
            return self.adjoint().multiply(other)?.trace();
        }
        if self.is_square() && self.shape() == other.shape() {
            return self.transpose().multiply(other)?.trace();
        }
        Err(CoreError::shape_mismatch("inner_product", self.shape(), other.shape()))
    }

    pub fn norm(&self) -> CoreResult<f64> {
        Ok(self.inner_product(self)?.real.sqrt())
    }

    pub fn distance(&self, other: &Self) -> CoreResult<f64> {
        self.subtract(other)?.norm()
    }

    /// Divides every element by the norm; the zero matrix has no normalization.
    ///
    /// For complex square matrices `trace(AᵗA)` may have a negative real part,
    /// leaving the norm undefined; that is reported instead of dividing by NaN.
    pub fn normalize(&self) -> CoreResult<Self> {
        let norm = self.norm()?;
        if !norm.is_finite() {
            return Err(CoreError::invalid_operand(format!("{}x{} matrix has no real norm", self.rows, self.cols)));
        }
        if norm == 0.0 {
            return Err(CoreError::DivideByZero);
        }
        Ok(self.map(|z| Complex::new(z.real / norm, z.imag / norm)))
    }

    /// Kronecker product. For A (m×n) and B (p×q) the result is (mp)×(nq) with
    /// `result[i][j] = A[i / p][j / q] * B[i % p][j % q]`.
    pub fn tensor(&self, other: &Self) -> Self {
        let (p, q) = other.shape();
        let rows = self.rows * p;
        let cols = self.cols * q;
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let a = self.data[(i / p) * self.cols + j / q];
                let b = other.data[(i % p) * q + j % q];
                data.push(a * b);
            }
        }
        Self { rows, cols, data }
    }

    pub fn is_vector(&self) -> bool {
        self.cols == 1
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Square and exactly equal to its own adjoint. Non-square input is simply
    /// `false`; callers needing a typed `NotSquare` error go through `observe`.
    pub fn is_hermitian(&self) -> bool {
        self.is_square() && *self == self.adjoint()
    }

    /// Square and `A·A† == I`, compared exactly. Non-square input is `false`
    /// rather than a `NotSquare` error.
    pub fn is_unitary(&self) -> bool {
        let Some(identity) = self.identity() else { return false };
        match self.multiply(&self.adjoint()) {
            Ok(product) => product == identity,
            Err(_) => false,
        }
    }
}

impl Index<(usize, usize)> for ComplexMatrix {
    type Output = Complex;

    fn index(&self, (row, col): (usize, usize)) -> &Complex {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds for {}x{} matrix", self.rows, self.cols);
        &self.data[row * self.cols + col]
    }
}

impl fmt::Display for ComplexMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, z) in self.data[i * self.cols..(i + 1) * self.cols].iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", z)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
