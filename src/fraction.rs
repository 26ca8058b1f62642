//! Exact fraction arithmetic.

use std::fmt;
use std::str::FromStr;

use num_rational::Rational64;
use num_traits::Zero;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FractionError {
    #[error("denominator must not be zero")]
    ZeroDenominator,

    #[error("cannot divide by a zero fraction")]
    DivisionByZero,

    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("'{0}' is not a fraction")]
    Invalid(String),
}

/// A rational number held in lowest terms with a positive denominator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fraction {
    numer: i64,
    denom: i64,
}

impl Fraction {
    /// Build a fraction, reducing it to lowest terms.
    ///
    /// The sign ends up on the numerator: `new(1, -2)` is `-1/2`.
    pub fn new(numer: i64, denom: i64) -> Result<Self, FractionError> {
        if denom == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        Ok(Self::from_ratio(Rational64::new(numer, denom)))
    }

    fn from_ratio(ratio: Rational64) -> Self {
        Self {
            numer: *ratio.numer(),
            denom: *ratio.denom(),
        }
    }

    fn ratio(self) -> Rational64 {
        // Invariant: already reduced with a non-zero denominator.
        Rational64::new_raw(self.numer, self.denom)
    }

    pub fn numer(self) -> i64 {
        self.numer
    }

    pub fn denom(self) -> i64 {
        self.denom
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    /// Parse `N/D`, or a bare integer `N` as `N/1`.
    fn from_str(s: &str) -> Result<Self, FractionError> {
        let invalid = || FractionError::Invalid(s.to_string());
        let (numer, denom) = match s.split_once('/') {
            Some((n, d)) => (
                n.trim().parse().map_err(|_| invalid())?,
                d.trim().parse().map_err(|_| invalid())?,
            ),
            None => (s.trim().parse().map_err(|_| invalid())?, 1),
        };
        Fraction::new(numer, denom)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FracOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl FracOp {
    /// Typeset spelling of the operator.
    pub fn latex(self) -> &'static str {
        match self {
            FracOp::Add => "+",
            FracOp::Sub => "-",
            FracOp::Mul => "\\times",
            FracOp::Div => "\\div",
        }
    }
}

impl fmt::Display for FracOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            FracOp::Add => "+",
            FracOp::Sub => "-",
            FracOp::Mul => "*",
            FracOp::Div => "/",
        };
        f.write_str(symbol)
    }
}

impl FromStr for FracOp {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, FractionError> {
        match s {
            "+" => Ok(FracOp::Add),
            "-" | "−" => Ok(FracOp::Sub),
            "*" | "x" | "×" => Ok(FracOp::Mul),
            "/" | "÷" => Ok(FracOp::Div),
            other => Err(FractionError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Combine two fractions, reducing the result to lowest terms.
///
/// ```rust
/// use askcalc::{combine, FracOp, Fraction};
///
/// let a = Fraction::new(1, 2).unwrap();
/// let b = Fraction::new(1, 3).unwrap();
/// assert_eq!(combine(a, b, FracOp::Add).unwrap(), Fraction::new(5, 6).unwrap());
/// ```
pub fn combine(a: Fraction, b: Fraction, op: FracOp) -> Result<Fraction, FractionError> {
    let (a, b) = (a.ratio(), b.ratio());
    let combined = match op {
        FracOp::Add => a + b,
        FracOp::Sub => a - b,
        FracOp::Mul => a * b,
        FracOp::Div => {
            if b.is_zero() {
                return Err(FractionError::DivisionByZero);
            }
            a / b
        }
    };
    Ok(Fraction::from_ratio(combined))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn add_reduces_over_common_denominator() {
        assert_eq!(combine(frac(1, 2), frac(1, 3), FracOp::Add).unwrap(), frac(5, 6));
    }

    #[test]
    fn mul_reduces_to_lowest_terms() {
        assert_eq!(combine(frac(1, 2), frac(2, 4), FracOp::Mul).unwrap(), frac(1, 4));
    }

    #[test]
    fn div_multiplies_by_the_reciprocal() {
        assert_eq!(combine(frac(3, 4), frac(2, 3), FracOp::Div).unwrap(), frac(9, 8));
    }

    #[test]
    fn div_by_zero_fraction_fails() {
        assert_eq!(
            combine(frac(1, 2), frac(0, 1), FracOp::Div),
            Err(FractionError::DivisionByZero)
        );
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(Fraction::new(1, 0), Err(FractionError::ZeroDenominator));
        assert_eq!("1/0".parse::<Fraction>(), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn sign_lands_on_the_numerator() {
        assert_eq!(frac(1, -2), frac(-1, 2));
        assert_eq!(frac(1, -2).denom(), 2);
        assert_eq!(combine(frac(1, 2), frac(-1, 2), FracOp::Div).unwrap(), frac(-1, 1));
    }

    #[test]
    fn zero_numerators_collapse_to_zero_over_one() {
        assert_eq!(combine(frac(0, 2), frac(0, 3), FracOp::Add).unwrap(), frac(0, 1));
    }

    #[test]
    fn parses_slash_and_bare_forms() {
        assert_eq!("3/9".parse::<Fraction>().unwrap(), frac(1, 3));
        assert_eq!("4".parse::<Fraction>().unwrap(), frac(4, 1));
        assert_eq!(
            "one/two".parse::<Fraction>(),
            Err(FractionError::Invalid("one/two".to_string()))
        );
    }

    #[test]
    fn operator_symbols_parse_and_anything_else_fails() {
        assert_eq!("÷".parse::<FracOp>().unwrap(), FracOp::Div);
        assert_eq!("×".parse::<FracOp>().unwrap(), FracOp::Mul);
        assert_eq!(
            "?".parse::<FracOp>(),
            Err(FractionError::UnsupportedOperator("?".to_string()))
        );
    }

    #[test]
    fn random_results_are_always_reduced() {
        fn gcd(mut a: i64, mut b: i64) -> i64 {
            while b != 0 {
                (a, b) = (b, a % b);
            }
            a.abs()
        }

        let ops = [FracOp::Add, FracOp::Sub, FracOp::Mul, FracOp::Div];
        for _ in 0..200 {
            let nonzero = || loop {
                let d = fastrand::i64(-30..30);
                if d != 0 {
                    break d;
                }
            };
            let a = frac(fastrand::i64(-30..30), nonzero());
            let b = frac(fastrand::i64(-30..30), nonzero());
            let op = ops[fastrand::usize(0..ops.len())];
            let Ok(r) = combine(a, b, op) else {
                continue; // division by a zero fraction
            };
            assert!(r.denom() > 0);
            assert_eq!(gcd(r.numer(), r.denom()), 1);
        }
    }
}
