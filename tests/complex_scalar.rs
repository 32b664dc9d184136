use std::f64::consts::{FRAC_PI_2, PI};

use proptest::prelude::*;
use qsim::{Complex, CoreError};

// Integer-valued parts keep every sum and product exact.
fn scalar() -> impl Strategy<Value = Complex> {
    (-100i32..100, -100i32..100).prop_map(|(re, im)| Complex::new(f64::from(re), f64::from(im)))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9
}

proptest! {
    #[test]
    fn addition_commutes_and_associates(a in scalar(), b in scalar(), c in scalar()) {
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!((a + b) + c, a + (b + c));
    }

    #[test]
    fn multiplication_commutes_and_associates(a in scalar(), b in scalar(), c in scalar()) {
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!((a * b) * c, a * (b * c));
    }

    #[test]
    fn conjugate_is_an_involution(z in scalar()) {
        prop_assert_eq!(z.conjugate().conjugate(), z);
    }

    #[test]
    fn modulus_matches_pythagoras(z in scalar()) {
        prop_assert_eq!(z.modulus(), (z.real * z.real + z.imag * z.imag).sqrt());
    }

    #[test]
    fn dividing_by_zero_always_fails(z in scalar()) {
        prop_assert_eq!(z.checked_div(Complex::ZERO), Err(CoreError::DivideByZero));
    }

    #[test]
    fn canonical_form_parses_back(z in scalar()) {
        let parsed: Complex = z.to_string().parse().unwrap();
        prop_assert_eq!(parsed, z);
    }
}

#[test]
fn canonical_string_forms() {
    let cases = [
        (Complex::new(0.0, 0.0), "0"),
        (Complex::new(3.0, 0.0), "3"),
        (Complex::new(0.0, 1.0), "i"),
        (Complex::new(0.0, -1.0), "-i"),
        (Complex::new(3.0, 4.0), "3+4i"),
        (Complex::new(-3.0, -2.0), "-3-2i"),
        (Complex::new(0.0, -5.0), "-5i"),
        (Complex::new(4.0, 1.0), "4+i"),
        (Complex::new(-3.43, -1.0), "-3.43-i"),
    ];
    for (z, expected) in cases {
        assert_eq!(z.to_string(), expected, "{:?}", z);
    }
}

#[test]
fn parses_scientific_notation_and_rejects_garbage() {
    assert_eq!("1e-3+2i".parse::<Complex>().unwrap(), Complex::new(0.001, 2.0));
    assert_eq!("-i".parse::<Complex>().unwrap(), Complex::new(0.0, -1.0));
    assert!(matches!("abc".parse::<Complex>(), Err(CoreError::InvalidOperand(_))));
    assert!(matches!("".parse::<Complex>(), Err(CoreError::InvalidOperand(_))));
    assert!(matches!("inf".parse::<Complex>(), Err(CoreError::InvalidOperand(_))));
}

#[test]
fn division() {
    let q = Complex::new(3.0, 4.0).checked_div(Complex::new(1.0, 2.0)).unwrap();
    assert_eq!(q, Complex::new(2.2, -0.4));
    assert_eq!(Complex::I.checked_div(Complex::I).unwrap(), Complex::ONE);
}

#[test]
fn angle_by_quadrant() {
    assert_eq!(Complex::new(0.0, 2.0).angle(), FRAC_PI_2);
    assert_eq!(Complex::new(0.0, -2.0).angle(), 3.0 * FRAC_PI_2);
    assert_eq!(Complex::ZERO.angle(), 0.0);
    assert_eq!(Complex::new(-1.0, 0.0).angle(), PI);
    assert!(approx(Complex::new(1.0, -1.0).angle(), 7.0 * PI / 4.0));
    assert!(approx(Complex::new(-1.0, 1.0).angle(), 3.0 * PI / 4.0));
}

#[test]
fn polar_round_trip() {
    for z in [Complex::new(3.0, 4.0), Complex::new(-2.5, 0.5), Complex::new(0.0, -7.0)] {
        let (modulus, angle) = z.to_polar();
        let back = Complex::from_polar(modulus, angle);
        assert!(approx(back.real, z.real) && approx(back.imag, z.imag), "{} -> {}", z, back);
    }
    assert_eq!(Complex::new(3.0, 4.0).modulus(), 5.0);
}

#[test]
fn conversions() {
    assert_eq!(Complex::from(2), Complex::new(2.0, 0.0));
    assert_eq!(Complex::from((1.5, -2.0)), Complex::new(1.5, -2.0));
    assert_eq!(Complex::try_from(&[1.0, 2.0][..]).unwrap(), Complex::new(1.0, 2.0));
    assert!(Complex::try_from(&[1.0, 2.0, 3.0][..]).is_err());
    assert_eq!(Complex::I * Complex::I, -Complex::ONE);
}
