use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::core::error::{CoreError, CoreResult};

/// Complex scalar with real and imaginary parts.
///
/// Equality is exact and componentwise. Division is the only fallible
/// arithmetic operation (see [`Complex::checked_div`]).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { real: 0.0, imag: 0.0 };
    pub const ONE: Complex = Complex { real: 1.0, imag: 0.0 };
    pub const I: Complex = Complex { real: 0.0, imag: 1.0 };

    // Constructor
    pub const fn new(real: f64, imag: f64) -> Self {
        Complex { real, imag }
    }

    pub fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imag == 0.0
    }

    // Modulus: sqrt(re² + im²)
    pub fn modulus(&self) -> f64 {
        (self.real.powi(2) + self.imag.powi(2)).sqrt()
    }

    pub fn conjugate(&self) -> Complex {
        Complex::new(self.real, -self.imag)
    }

    // Division of two complex numbers
    pub fn checked_div(self, other: Complex) -> CoreResult<Complex> {
        let denominator = other.real.powi(2) + other.imag.powi(2);
        if denominator == 0.0 {
            return Err(CoreError::DivideByZero);
        }
        Ok(Complex::new(
            (self.real * other.real + self.imag * other.imag) / denominator,
            (self.imag * other.real - self.real * other.imag) / denominator,
        ))
    }

    /// Angle in `[0, 2π)`, resolved by quadrant.
    ///
    /// A zero real part maps to +90° or +270° depending on the sign of the
    /// imaginary part; the zero scalar has angle 0.
    pub fn angle(&self) -> f64 {
        if self.real == 0.0 {
            return if self.imag > 0.0 {
                FRAC_PI_2
            } else if self.imag < 0.0 {
                3.0 * FRAC_PI_2
            } else {
                0.0
            };
        }
        let base = (self.imag / self.real).atan();
        if self.real < 0.0 {
            base + PI
        } else if self.imag < 0.0 {
            base + 2.0 * PI
        } else {
            base
        }
    }

    // Converts to polar form (modulus, angle)
    pub fn to_polar(&self) -> (f64, f64) {
        (self.modulus(), self.angle())
    }

    // Creates a complex number from polar coordinates
    pub fn from_polar(modulus: f64, angle: f64) -> Complex {
        Complex::new(modulus * angle.cos(), modulus * angle.sin())
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, other: Complex) -> Complex {
        Complex::new(self.real + other.real, self.imag + other.imag)
    }
}

impl Sub for Complex {
    type Output = Complex;
    fn sub(self, other: Complex) -> Complex {
        self + (-other)
    }
}

impl Mul for Complex {
    type Output = Complex;
    fn mul(self, other: Complex) -> Complex {
        Complex::new(
            self.real * other.real - self.imag * other.imag,
            self.real * other.imag + self.imag * other.real,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex::new(-self.real, -self.imag)
    }
}

impl Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.fold(Complex::ZERO, |acc, z| acc + z)
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Complex::new(real, 0.0)
    }
}

impl From<i32> for Complex {
    fn from(real: i32) -> Self {
        Complex::new(f64::from(real), 0.0)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((real, imag): (f64, f64)) -> Self {
        Complex::new(real, imag)
    }
}

impl TryFrom<&[f64]> for Complex {
    type Error = CoreError;

    fn try_from(parts: &[f64]) -> CoreResult<Self> {
        match parts {
            [real, imag] => Ok(Complex::new(*real, *imag)),
            _ => Err(CoreError::invalid_operand(format!(
                "a complex number needs exactly 2 parts, got {}",
                parts.len()
            ))),
        }
    }
}

#[cfg(feature = "interop")]
impl From<num_complex::Complex64> for Complex {
    fn from(z: num_complex::Complex64) -> Self {
        Complex::new(z.re, z.im)
    }
}

#[cfg(feature = "interop")]
impl From<Complex> for num_complex::Complex64 {
    fn from(z: Complex) -> Self {
        num_complex::Complex64::new(z.real, z.imag)
    }
}

/// Canonical form: zero parts are omitted, a unit imaginary coefficient is
/// written as a bare `i`, and `+`/`-` follow the sign of the imaginary part.
impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (re, im) = (self.real, self.imag);
        let coefficient = |v: f64| if v.abs() == 1.0 { String::new() } else { v.abs().to_string() };
        if re != 0.0 {
            if im == 0.0 {
                write!(f, "{}", re)
            } else {
                let sign = if im > 0.0 { '+' } else { '-' };
                write!(f, "{}{}{}i", re, sign, coefficient(im))
            }
        } else if im != 0.0 {
            let sign = if im < 0.0 { "-" } else { "" };
            write!(f, "{}{}i", sign, coefficient(im))
        } else {
            write!(f, "0")
        }
    }
}

/// Parses the canonical form produced by `Display`.
impl FromStr for Complex {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let text = s.trim();
        let invalid = || CoreError::invalid_operand(format!("'{}' is not a complex number", s));
        if text.is_empty() {
            return Err(invalid());
        }

        let Some(body) = text.strip_suffix('i') else {
            return parse_real(text).ok_or_else(invalid).map(Complex::from);
        };

        // Split before the last sign that is not leading and not an exponent sign.
        let bytes = body.as_bytes();
        let split = (1..bytes.len()).rev().find(|&k| {
            matches!(bytes[k], b'+' | b'-') && !matches!(bytes[k - 1], b'e' | b'E')
        });
        let (real_part, imag_part) = match split {
            Some(k) => (Some(&body[..k]), &body[k..]),
            None => (None, body),
        };
        let imag = match imag_part {
            "" | "+" => 1.0,
            "-" => -1.0,
            other => parse_real(other).ok_or_else(invalid)?,
        };
        let real = match real_part {
            Some(r) => parse_real(r).ok_or_else(invalid)?,
            None => 0.0,
        };
        Ok(Complex::new(real, imag))
    }
}

fn parse_real(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
