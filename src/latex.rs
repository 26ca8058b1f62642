//! Typesetting canonical arithmetic as LaTeX.
//!
//! A purely textual rewrite, no evaluation. Division is grouped at token
//! level: each `/` consumes the adjacent literal, name or bracketed group
//! on either side, so `sin(30)/2` and chained `8/4/2` typeset correctly.
//! A multi-term operand without parentheses is grouped only up to its
//! nearest token (`1+2/3` becomes `1+\frac{2}{3}`).

use crate::fraction::{FracOp, Fraction};

/// Rewrite a canonical expression into LaTeX notation.
///
/// ```rust
/// assert_eq!(askcalc::to_latex("sqrt(16)"), "\\sqrt{16}");
/// assert_eq!(askcalc::to_latex("1/2"), "\\frac{1}{2}");
/// ```
pub fn to_latex(expr: &str) -> String {
    let expr = rewrite_sqrt(expr);
    let expr = expr
        .replace("sin(", "\\sin(")
        .replace("cos(", "\\cos(")
        .replace("tan(", "\\tan(")
        .replace("log(", "\\log(")
        .replace("ln(", "\\ln(");
    let expr = rewrite_div(&expr);
    expr.replace("pi", "\\pi").replace('*', "\\cdot ")
}

/// The derivation line the fraction calculator displays.
pub fn fraction_derivation(a: Fraction, op: FracOp, b: Fraction, result: Fraction) -> String {
    format!(
        "{} {} {} = {}",
        frac_latex(a),
        op.latex(),
        frac_latex(b),
        frac_latex(result)
    )
}

fn frac_latex(f: Fraction) -> String {
    format!("\\frac{{{}}}{{{}}}", f.numer(), f.denom())
}

/// `sqrt(...)` to `\sqrt{...}`, consuming the matching parenthesis group.
fn rewrite_sqrt(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i..].starts_with(&['s', 'q', 'r', 't', '(']) {
            let open = i + 5;
            let close = matching_paren(&chars, open - 1);
            let end = close.unwrap_or(chars.len());
            let inner: String = chars[open..end].iter().collect();
            out.push_str("\\sqrt{");
            out.push_str(&rewrite_sqrt(&inner));
            out.push('}');
            i = end + 1;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Index of the `)` matching the `(` at `open`, accounting for nesting.
fn matching_paren(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Each `/` becomes `\frac{left}{right}` over its adjacent operands.
fn rewrite_div(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '/' {
            match (left_operand(&mut out), right_operand(&chars, i + 1)) {
                (Some(numer), Some((denom, next))) => {
                    out.extend("\\frac{".chars());
                    out.extend(numer);
                    out.extend("}{".chars());
                    out.extend(denom);
                    out.push('}');
                    i = next;
                    continue;
                }
                (numer, _) => {
                    // No usable operand pair; keep the slash as-is.
                    if let Some(numer) = numer {
                        out.extend(numer);
                    }
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out.into_iter().collect()
}

/// Pop the numerator tokens off the already-emitted output.
fn left_operand(out: &mut Vec<char>) -> Option<Vec<char>> {
    let mut end = out.len();
    while end > 0 && out[end - 1] == ' ' {
        end -= 1;
    }
    if end == 0 {
        return None;
    }

    let mut start = end;
    if matches!(out[start - 1], ')' | '}') {
        // One or more trailing groups, then any attached function name.
        while start > 0 && matches!(out[start - 1], ')' | '}') {
            start = open_of_group(out, start)?;
        }
        while start > 0 && (out[start - 1].is_ascii_alphabetic() || out[start - 1] == '\\') {
            start -= 1;
        }
    } else if out[start - 1].is_ascii_alphanumeric() || out[start - 1] == '.' {
        while start > 0 && (out[start - 1].is_ascii_alphanumeric() || out[start - 1] == '.') {
            start -= 1;
        }
    } else {
        return None;
    }

    let operand = out[start..end].to_vec();
    out.truncate(start);
    Some(operand)
}

/// Walk back from the closer at `end - 1` to its opener's index.
fn open_of_group(out: &[char], end: usize) -> Option<usize> {
    let close = out[end - 1];
    let open = if close == ')' { '(' } else { '{' };
    let mut depth = 0usize;
    let mut i = end;
    while i > 0 {
        i -= 1;
        if out[i] == close {
            depth += 1;
        } else if out[i] == open {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Scan the denominator tokens after the slash; returns the operand and
/// the index to resume from.
fn right_operand(chars: &[char], from: usize) -> Option<(Vec<char>, usize)> {
    let mut i = from;
    while i < chars.len() && chars[i] == ' ' {
        i += 1;
    }
    let start = i;

    if i < chars.len() && chars[i] == '-' {
        i += 1;
    }
    // Optional function name (possibly LaTeX-escaped), then a group or a
    // literal run.
    while i < chars.len() && (chars[i].is_ascii_alphabetic() || chars[i] == '\\') {
        i += 1;
    }
    if i < chars.len() && matches!(chars[i], '(' | '{') {
        let open = chars[i];
        let close = if open == '(' { ')' } else { '}' };
        let mut depth = 0usize;
        while i < chars.len() {
            if chars[i] == open {
                depth += 1;
            } else if chars[i] == close {
                depth -= 1;
                if depth == 0 {
                    i += 1;
                    break;
                }
            }
            i += 1;
        }
        if depth != 0 {
            return None;
        }
    } else {
        while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
            i += 1;
        }
    }

    let operand: Vec<char> = chars[start..i].to_vec();
    if operand.is_empty() || operand == ['-'] {
        return None;
    }
    Some((operand, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_expressions_pass_through() {
        assert_eq!(to_latex("x^2"), "x^2");
        assert_eq!(to_latex("x^3 - 2*x"), "x^3 - 2\\cdot x");
    }

    #[test]
    fn sqrt_consumes_its_group() {
        assert_eq!(to_latex("sqrt(16)"), "\\sqrt{16}");
        assert_eq!(to_latex("sqrt(1 + sqrt(4))"), "\\sqrt{1 + \\sqrt{4}}");
    }

    #[test]
    fn functions_and_pi_are_escaped() {
        assert_eq!(to_latex("sin(x) + cos(x)"), "\\sin(x) + \\cos(x)");
        assert_eq!(to_latex("tan(pi)"), "\\tan(\\pi)");
        assert_eq!(to_latex("log(10) + ln(1)"), "\\log(10) + \\ln(1)");
    }

    #[test]
    fn division_groups_adjacent_tokens() {
        assert_eq!(to_latex("1/2"), "\\frac{1}{2}");
        assert_eq!(to_latex("sin(30)/2"), "\\frac{\\sin(30)}{2}");
        assert_eq!(to_latex("(1+2)/(3+4)"), "\\frac{(1+2)}{(3+4)}");
        assert_eq!(to_latex("2/pi"), "\\frac{2}{\\pi}");
    }

    #[test]
    fn chained_division_nests_leftwards() {
        assert_eq!(to_latex("8/4/2"), "\\frac{\\frac{8}{4}}{2}");
    }

    #[test]
    fn division_binds_tighter_than_addition() {
        assert_eq!(to_latex("1+2/3"), "1+\\frac{2}{3}");
    }

    #[test]
    fn dangling_slash_is_kept() {
        assert_eq!(to_latex("1/"), "1/");
        assert_eq!(to_latex("/2"), "/2");
    }

    #[test]
    fn everything_together() {
        assert_eq!(
            to_latex("sqrt(16) + sin(30)/2 * pi"),
            "\\sqrt{16} + \\frac{\\sin(30)}{2} \\cdot  \\pi"
        );
    }

    #[test]
    fn derivation_line_matches_the_display_form() {
        let half = Fraction::new(1, 2).unwrap();
        let third = Fraction::new(1, 3).unwrap();
        let sum = Fraction::new(5, 6).unwrap();
        assert_eq!(
            fraction_derivation(half, FracOp::Add, third, sum),
            "\\frac{1}{2} + \\frac{1}{3} = \\frac{5}{6}"
        );
    }
}
