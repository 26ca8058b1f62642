//! Rewrites natural-language arithmetic into canonical syntax.

/// Phrase table applied as sequential find-and-replace passes.
///
/// Order is load-bearing: a longer phrase must sit before any shorter
/// phrase it contains (`умножить на` before `умножить`, `косинус` before
/// `синус`), since each pass sees the output of the previous one.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("плюс", "+"),
    ("сложить", "+"),
    ("минус", "-"),
    ("вычесть", "-"),
    ("умножить на", "*"),
    ("умножить", "*"),
    ("разделить на", "/"),
    ("делить", "/"),
    ("в степени", "^"),
    ("степень", "^"),
    ("корень из", "sqrt("),
    ("косинус", "cos("),
    ("синус", "sin("),
    ("тангенс", "tan("),
    ("пи", "pi"),
];

/// Rewrite a spoken-style request into canonical arithmetic syntax.
///
/// Case-folds, substitutes each phrase in [`SUBSTITUTIONS`] order, then
/// appends enough `)` to balance any parentheses opened by the function
/// phrases. The output is *structurally* balanced but is not validated
/// as arithmetic; that is the evaluator's job.
///
/// ```rust
/// let expr = askcalc::normalize("2 плюс 2 умножить на 2");
/// assert_eq!(expr, "2 + 2 * 2");
/// ```
pub fn normalize(text: &str) -> String {
    let mut expr = text.to_lowercase();
    for (phrase, symbol) in SUBSTITUTIONS {
        expr = expr.replace(phrase, symbol);
    }

    let opens = expr.matches('(').count();
    let closes = expr.matches(')').count();
    for _ in 0..opens.saturating_sub(closes) {
        expr.push(')');
    }

    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbal_phrases_become_symbols() {
        assert_eq!(normalize("7 минус 3"), "7 - 3");
        assert_eq!(normalize("2 сложить 5"), "2 + 5");
        assert_eq!(normalize("8 разделить на 4"), "8 / 4");
        assert_eq!(normalize("15 в степени 3"), "15 ^ 3");
    }

    #[test]
    fn function_phrases_open_and_balance_parens() {
        assert_eq!(
            normalize("корень из 16 плюс синус 30 умножить на 2"),
            "sqrt( 16 + sin( 30 * 2))"
        );
        assert_eq!(normalize("корень из 144"), "sqrt( 144)");
    }

    #[test]
    fn cosine_is_not_mangled_by_the_sine_pass() {
        assert_eq!(normalize("косинус 45"), "cos( 45)");
        assert_eq!(normalize("синус 45 плюс косинус 45"), "sin( 45 + cos( 45))");
    }

    #[test]
    fn pi_and_case_folding() {
        assert_eq!(normalize("Пи умножить 2"), "pi * 2");
        assert_eq!(normalize("SIN(0)"), "sin(0)");
    }

    #[test]
    fn canonical_input_is_a_fixed_point() {
        for expr in ["2 + 2 * 2", "sqrt(16)", "sin(30 * pi)"] {
            let once = normalize(expr);
            assert_eq!(once, expr);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn surplus_closing_parens_are_left_alone() {
        assert_eq!(normalize("(1))"), "(1))");
    }
}
