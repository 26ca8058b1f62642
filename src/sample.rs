//! Function sampling for plots.

use meval::Expr;
use serde::Serialize;

use crate::eval::{context, EvalError};

/// Default plotting domain.
pub const DEFAULT_MIN: f64 = -10.0;
pub const DEFAULT_MAX: f64 = 10.0;
pub const DEFAULT_STEP: f64 = 0.2;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Evaluate `expr` as a function of `x` over `[x_min, x_max]` in `step`
/// increments, upper bound included.
///
/// Grid points where the function leaves the finite reals are dropped,
/// not substituted, so the sequence may be shorter than the domain.
/// Coordinates are rounded to two decimals to stabilise display and
/// comparison. An expression that does not parse, or references names
/// other than `x`, fails up front.
///
/// ```rust
/// use askcalc::{sample, SamplePoint};
///
/// let points = sample("x^2", -10.0, 10.0, 0.2).unwrap();
/// assert!(points.contains(&SamplePoint { x: 0.0, y: 0.0 }));
/// assert!(points.contains(&SamplePoint { x: 2.0, y: 4.0 }));
/// ```
pub fn sample(expr: &str, x_min: f64, x_max: f64, step: f64) -> Result<Vec<SamplePoint>, EvalError> {
    let parsed: Expr = expr.parse().map_err(EvalError::from_meval)?;
    let f = parsed
        .bind_with_context(context(), "x")
        .map_err(EvalError::from_meval)?;

    if !(step > 0.0) || x_min > x_max {
        return Ok(Vec::new());
    }

    // Index-based stepping keeps the grid free of accumulated float drift;
    // the epsilon keeps the upper bound inclusive.
    let count = ((x_max - x_min) / step + 1e-9).floor() as usize;
    let mut points = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let x = x_min + i as f64 * step;
        let y = f(x);
        if y.is_finite() {
            points.push(SamplePoint {
                x: round2(x),
                y: round2(y),
            });
        }
    }

    Ok(points)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
