//! Observation and discrete-time dynamics over state vectors.

use crate::core::algebra::complex::Complex;
use crate::core::algebra::matrix::ComplexMatrix;
use crate::core::error::{CoreError, CoreResult};

fn require_observable(vector: &ComplexMatrix, observable: &ComplexMatrix) -> CoreResult<()> {
    if !observable.is_square() {
        return Err(CoreError::NotSquare { rows: observable.rows(), cols: observable.cols() });
    }
    if !vector.is_vector() || vector.rows() != observable.cols() {
        return Err(CoreError::shape_mismatch("observe", (observable.cols(), 1), vector.shape()));
    }
    if !observable.is_hermitian() {
        return Err(CoreError::invalid_operand("the observable must be a hermitian matrix"));
    }
    Ok(())
}

/// Applies a hermitian observable to a state vector.
pub fn observe(vector: &ComplexMatrix, observable: &ComplexMatrix) -> CoreResult<ComplexMatrix> {
    require_observable(vector, observable)?;
    observable.multiply(vector)
}

/// Mean value of the observable on the given state: `re ⟨v, Ω v⟩`.
pub fn expected_value(vector: &ComplexMatrix, observable: &ComplexMatrix) -> CoreResult<f64> {
    let observed = observe(vector, observable)?;
    Ok(vector.inner_product(&observed)?.real)
}

/// Probability of finding the system described by `vector` at position `index`.
pub fn probability_at(vector: &ComplexMatrix, index: usize) -> CoreResult<f64> {
    if !vector.is_vector() {
        return Err(CoreError::shape_mismatch("probability_at", (vector.rows(), 1), vector.shape()));
    }
    let amplitude = vector
        .get(index, 0)
        .ok_or_else(|| CoreError::out_of_range(format!("position {} of a {}-element state", index, vector.rows())))?;
    let norm = vector.norm()?;
    if norm == 0.0 {
        return Err(CoreError::DivideByZero);
    }
    Ok(amplitude.modulus().powi(2) / norm.powi(2))
}

/// `⟨v, w⟩ / (‖v‖ ‖w‖)`, the amplitude of transitioning from `v` to `w`.
pub fn transition_amplitude(from: &ComplexMatrix, to: &ComplexMatrix) -> CoreResult<Complex> {
    let product = from.inner_product(to)?;
    let scale = from.norm()? * to.norm()?;
    product.checked_div(Complex::from(scale))
}

/// Elementwise `|m_ij|² / ‖m‖²`.
pub fn probability_matrix(matrix: &ComplexMatrix) -> CoreResult<ComplexMatrix> {
    let norm_sq = matrix.norm()?.powi(2);
    if !norm_sq.is_finite() {
        return Err(CoreError::invalid_operand("matrix has no real norm"));
    }
    if norm_sq == 0.0 {
        return Err(CoreError::DivideByZero);
    }
    Ok(matrix.map(|z| Complex::from(z.modulus().powi(2) / norm_sq)))
}

/// States after applying `dynamics` to `state` once, twice, ... `steps` times.
pub fn evolve(dynamics: &ComplexMatrix, state: &ComplexMatrix, steps: usize) -> CoreResult<Vec<ComplexMatrix>> {
    let mut states = Vec::with_capacity(steps);
    let mut current = state.clone();
    for _ in 0..steps {
        current = dynamics.multiply(&current)?;
        states.push(current.clone());
    }
    Ok(states)
}
