//! Expression evaluation on top of `meval`.

use meval::Context;
use thiserror::Error;

/// The one failure surfaced for anything that cannot be computed.
///
/// Syntax errors, unknown names and non-finite results all collapse into
/// this fixed message; the underlying cause is kept only as a source for
/// diagnostics.
#[derive(Debug, Error)]
#[error("could not evaluate the expression")]
pub struct EvalError {
    #[source]
    source: Option<meval::Error>,
}

impl EvalError {
    pub(crate) fn from_meval(source: meval::Error) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub(crate) fn non_finite() -> Self {
        Self { source: None }
    }

    /// The offending name, when evaluation failed on an unrecognised symbol.
    pub fn unknown_symbol(&self) -> Option<&str> {
        match &self.source {
            Some(meval::Error::UnknownVariable(name)) => Some(name),
            _ => None,
        }
    }
}

/// Names the evaluator recognises beyond plain arithmetic.
pub(crate) const KNOWN_NAMES: &[&str] = &[
    "sin", "cos", "tan", "sqrt", "log", "ln", "exp", "abs", "pi", "e",
];

/// The shared evaluation context: `meval` builtins plus a base-10 `log`.
pub(crate) fn context() -> Context<'static> {
    let mut ctx = Context::new();
    ctx.func("log", f64::log10);
    ctx
}

/// Evaluate a canonical arithmetic expression to its display string.
///
/// The result is formatted with `f64`'s `Display`, so whole values print
/// without a fractional part. A result outside the finite reals (`1/0`,
/// `log(0)`, …) is an error, not a value.
///
/// ```rust
/// assert_eq!(askcalc::evaluate("2 + 2 * 2").unwrap(), "6");
/// assert!(askcalc::evaluate("1/0").is_err());
/// ```
pub fn evaluate(expr: &str) -> Result<String, EvalError> {
    let value = meval::eval_str_with_context(expr, context()).map_err(EvalError::from_meval)?;
    if !value.is_finite() {
        return Err(EvalError::non_finite());
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_operator_precedence() {
        assert_eq!(evaluate("2+2*2").unwrap(), "6");
        assert_eq!(evaluate("(2+2)*2").unwrap(), "8");
        assert_eq!(evaluate("2^10").unwrap(), "1024");
    }

    #[test]
    fn whole_results_print_without_a_fraction() {
        assert_eq!(evaluate("sqrt(16)").unwrap(), "4");
        assert_eq!(evaluate("1/2").unwrap(), "0.5");
    }

    #[test]
    fn log_is_base_ten_and_ln_is_natural() {
        assert_eq!(evaluate("log(100)").unwrap(), "2");
        assert_eq!(evaluate("ln(1)").unwrap(), "0");
    }

    #[test]
    fn constants_are_available() {
        assert_eq!(evaluate("pi").unwrap(), std::f64::consts::PI.to_string());
    }

    #[test]
    fn division_by_zero_is_an_error_not_infinity() {
        assert!(evaluate("1/0").is_err());
        assert!(evaluate("0/0").is_err());
    }

    #[test]
    fn garbage_is_an_error_with_the_fixed_message() {
        let err = evaluate("2 +* 2").unwrap_err();
        assert_eq!(err.to_string(), "could not evaluate the expression");
    }

    #[test]
    fn unknown_symbols_are_retrievable() {
        let err = evaluate("2 + foo").unwrap_err();
        assert_eq!(err.unknown_symbol(), Some("foo"));
        assert_eq!(err.to_string(), "could not evaluate the expression");
    }
}
