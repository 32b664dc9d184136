use proptest::prelude::*;
use qsim::core::algebra::gates;
use qsim::{Complex, ComplexMatrix, CoreError};

fn entries(n: usize) -> impl Strategy<Value = Vec<Complex>> {
    prop::collection::vec((-9i32..10, -9i32..10), n)
        .prop_map(|v| v.into_iter().map(|(re, im)| Complex::new(f64::from(re), f64::from(im))).collect())
}

fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = ComplexMatrix> {
    entries(rows * cols).prop_map(move |data| ComplexMatrix::from_flat(rows, cols, data).unwrap())
}

fn m(grid: Vec<Vec<(f64, f64)>>) -> ComplexMatrix {
    let rows = grid.len();
    let cols = grid[0].len();
    ComplexMatrix::new(rows, cols, grid).unwrap()
}

proptest! {
    #[test]
    fn transpose_is_an_involution(a in matrix(2, 3)) {
        prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn transpose_and_adjoint_reverse_products(a in matrix(2, 3), b in matrix(3, 2)) {
        let ab = a.multiply(&b).unwrap();
        prop_assert_eq!(ab.transpose(), b.transpose().multiply(&a.transpose()).unwrap());
        prop_assert_eq!(ab.adjoint(), b.adjoint().multiply(&a.adjoint()).unwrap());
    }

    #[test]
    fn multiplication_distributes(a in matrix(2, 3), b in matrix(3, 2), c in matrix(3, 2)) {
        let left = a.multiply(&b.add(&c).unwrap()).unwrap();
        let right = a.multiply(&b).unwrap().add(&a.multiply(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn identity_is_neutral(a in matrix(3, 3)) {
        let id = a.identity().unwrap();
        prop_assert_eq!(a.multiply(&id).unwrap(), a);
    }

    #[test]
    fn tensor_shape_law(a in matrix(2, 3), b in matrix(3, 2)) {
        let t = a.tensor(&b);
        prop_assert_eq!(t.shape(), (6, 6));
        for i in 0..6 {
            for j in 0..6 {
                prop_assert_eq!(t[(i, j)], a[(i / 3, j / 2)] * b[(i % 3, j % 2)]);
            }
        }
    }

    #[test]
    fn inner_product_is_positive_on_nonzero_vectors(v in matrix(3, 1)) {
        prop_assume!(v.iter().any(|z| !z.is_zero()));
        prop_assert!(v.inner_product(&v).unwrap().real > 0.0);
    }

    #[test]
    fn inner_product_with_zero_vanishes(v in matrix(3, 1)) {
        let zero = ComplexMatrix::zeros(3, 1).unwrap();
        prop_assert_eq!(v.inner_product(&zero).unwrap(), Complex::ZERO);
    }

    #[test]
    fn inner_product_is_conjugate_symmetric(u in matrix(3, 1), v in matrix(3, 1)) {
        prop_assert_eq!(u.inner_product(&v).unwrap(), v.inner_product(&u).unwrap().conjugate());
    }

    #[test]
    fn inner_product_linearity(u in matrix(3, 1), v in matrix(3, 1), w in matrix(3, 1), c in entries(1)) {
        let c = c[0];
        let sum = u.inner_product(&v.add(&w).unwrap()).unwrap();
        prop_assert_eq!(sum, u.inner_product(&v).unwrap() + u.inner_product(&w).unwrap());
        prop_assert_eq!(u.inner_product(&v.scale(c)).unwrap(), c * u.inner_product(&v).unwrap());
        prop_assert_eq!(u.scale(c).inner_product(&v).unwrap(), c.conjugate() * u.inner_product(&v).unwrap());
    }
}

#[test]
fn multiply_2x2() {
    let a = ComplexMatrix::new(2, 2, vec![vec![1, 2], vec![3, 4]]).unwrap();
    let b = ComplexMatrix::new(2, 2, vec![vec![5, 6], vec![7, 8]]).unwrap();
    let c = a.multiply(&b).unwrap();
    assert_eq!(c, ComplexMatrix::new(2, 2, vec![vec![19, 22], vec![43, 50]]).unwrap());
}

#[test]
fn shape_errors_report_both_shapes() {
    let square = ComplexMatrix::zeros(2, 2).unwrap();
    let column = ComplexMatrix::zeros(3, 1).unwrap();
    assert_eq!(
        square.add(&column),
        Err(CoreError::ShapeMismatch { op: "add", expected: (2, 2), actual: (3, 1) })
    );
    let wide = ComplexMatrix::zeros(2, 3).unwrap();
    assert_eq!(
        wide.multiply(&square),
        Err(CoreError::ShapeMismatch { op: "multiply", expected: (2, 3), actual: (2, 2) })
    );
    assert_eq!(
        wide.multiply(&square).unwrap_err().to_string(),
        "Shape mismatch in multiply: expected 2x3, found 2x2"
    );
    assert_eq!(wide.trace(), Err(CoreError::NotSquare { rows: 2, cols: 3 }));
    assert!(wide.identity().is_none());
    assert!(matches!(
        ComplexMatrix::new(2, 2, vec![vec![1, 2], vec![3]]),
        Err(CoreError::ShapeMismatch { op: "construct", .. })
    ));
}

#[test]
fn norm_distance_and_normalize() {
    let v = ComplexMatrix::column_vector(vec![3, 4]).unwrap();
    assert_eq!(v.norm().unwrap(), 5.0);
    let w = ComplexMatrix::column_vector(vec![0, 0]).unwrap();
    assert_eq!(v.distance(&w).unwrap(), 5.0);
    assert_eq!(v.normalize().unwrap(), ComplexMatrix::column_vector(vec![0.6, 0.8]).unwrap());
    assert_eq!(w.normalize(), Err(CoreError::DivideByZero));
}

#[test]
fn normalize_rejects_matrices_without_a_real_norm() {
    let i = m(vec![vec![(0.0, 1.0), (0.0, 0.0)], vec![(0.0, 0.0), (0.0, 1.0)]]);
    assert!(i.norm().unwrap().is_nan());
    assert!(matches!(i.normalize(), Err(CoreError::InvalidOperand(_))));
}

#[test]
fn hermitian_and_unitary_checks() {
    let hermitian = m(vec![vec![(2.0, 0.0), (1.0, -1.0)], vec![(1.0, 1.0), (3.0, 0.0)]]);
    assert!(hermitian.is_hermitian());
    assert!(!m(vec![vec![(0.0, 0.0), (1.0, 0.0)], vec![(0.0, 0.0), (0.0, 0.0)]]).is_hermitian());

    assert!(gates::cnot().is_unitary());
    assert!(m(vec![vec![(0.0, 0.0), (0.0, 1.0)], vec![(0.0, 1.0), (0.0, 0.0)]]).is_unitary());
    assert!(!ComplexMatrix::new(2, 2, vec![vec![1, 1], vec![0, 1]]).unwrap().is_unitary());
    assert!(!ComplexMatrix::zeros(2, 3).unwrap().is_unitary());
}

#[test]
fn trace_and_display() {
    let a = m(vec![vec![(1.0, 0.0), (0.0, 0.0)], vec![(0.0, 0.0), (0.0, 1.0)]]);
    assert_eq!(a.trace().unwrap(), Complex::new(1.0, 1.0));
    assert_eq!(a.to_string(), "[[1, 0], [0, i]]");
    assert_eq!(a.conjugate().to_string(), "[[1, 0], [0, -i]]");
}

#[test]
fn tensor_of_identities_is_identity() {
    let i2 = gates::identity(2).unwrap();
    assert_eq!(i2.tensor(&i2), gates::identity(4).unwrap());
    assert!(gates::identity(0).is_err());
}
