//! Rewriting of user glyphs and special functions into primitive arithmetic.
//!
//! Runs on the raw expression before tokenization. Each rewrite is a single
//! left-to-right pass; substituted text is not scanned again by the same
//! rule.

use super::error::EvalError;
use super::evaluation::evaluate;
use super::token::is_number_char;

pub const SQRT_GLYPH: char = '√';
pub const SQUARE_GLYPH: char = '²';

/// Replace display glyphs with primitive operators: `×` → `*`, `÷` → `/`,
/// `^` → `**`.
pub fn canonicalize(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    for c in expr.chars() {
        match c {
            '×' => out.push('*'),
            '÷' => out.push('/'),
            '^' => out.push_str("**"),
            _ => out.push(c),
        }
    }
    out
}

/// Canonicalize `expr`, then expand `√(…)` and postfix `²`.
pub fn preprocess(expr: &str) -> Result<String, EvalError> {
    let canonical = canonicalize(expr);
    let rooted = expand_square_roots(&canonical)?;
    expand_squares(&rooted)
}

/// Replace every `√(inner)` with the square root of `inner`, evaluated as a
/// complete expression.
///
/// `inner` runs to the parenthesis that closes the `√(`. A `√(` with no
/// closing parenthesis, or with nothing inside, is left as it is.
fn expand_square_roots(expr: &str) -> Result<String, EvalError> {
    let mut out = String::with_capacity(expr.len());
    let mut rest = expr;

    while let Some(at) = rest.find(SQRT_GLYPH) {
        out.push_str(&rest[..at]);
        let after_glyph = &rest[at + SQRT_GLYPH.len_utf8()..];

        let Some(body) = after_glyph.strip_prefix('(') else {
            out.push(SQRT_GLYPH);
            rest = after_glyph;
            continue;
        };

        match closing_paren(body) {
            Some(end) if end > 0 => {
                let inner = &body[..end];
                let value = evaluate(inner)?.sqrt();
                tracing::debug!(inner, value, "expanded square root");
                out.push_str(&value.to_string());
                rest = &body[end + 1..];
            }
            _ => {
                out.push(SQRT_GLYPH);
                rest = after_glyph;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Byte offset of the `)` that balances an already-consumed `(`.
fn closing_paren(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Replace a decimal literal immediately followed by `²` with its square.
/// A `²` with no literal before it is left for the tokenizer to skip.
fn expand_squares(expr: &str) -> Result<String, EvalError> {
    let mut out = String::with_capacity(expr.len());

    for c in expr.chars() {
        if c != SQUARE_GLYPH {
            out.push(c);
            continue;
        }

        let start = out
            .char_indices()
            .rev()
            .take_while(|&(_, ch)| is_number_char(ch))
            .last()
            .map(|(i, _)| i);

        match start {
            Some(start) => {
                let literal = out.split_off(start);
                let value: f64 = literal
                    .parse()
                    .map_err(|_| EvalError::InvalidNumber(literal.clone()).into_invalid())?;
                tracing::debug!(literal = %literal, squared = value * value, "expanded square");
                out.push_str(&(value * value).to_string());
            }
            None => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_glyphs() {
        assert_eq!(canonicalize("2×3÷4^2"), "2*3/4**2");
        assert_eq!(canonicalize("1+2"), "1+2");
    }

    #[test]
    fn test_square_root_of_sum() {
        assert_eq!(preprocess("√(4+5)").unwrap(), "3");
        assert_eq!(preprocess("2×√(16)").unwrap(), "2*4");
    }

    #[test]
    fn test_nested_square_root() {
        assert_eq!(preprocess("√(√(16))").unwrap(), "2");
    }

    #[test]
    fn test_several_square_roots() {
        assert_eq!(preprocess("√(9)+√(4)").unwrap(), "3+2");
    }

    #[test]
    fn test_square_root_without_parens_untouched() {
        assert_eq!(preprocess("√9").unwrap(), "√9");
        assert_eq!(preprocess("√()").unwrap(), "√()");
        assert_eq!(preprocess("√(4").unwrap(), "√(4");
    }

    #[test]
    fn test_square_root_failure_propagates() {
        let err = preprocess("√(1/0)").unwrap_err();
        assert!(matches!(err, EvalError::InvalidExpression(_)));
        assert_eq!(err.root_cause(), &EvalError::DivisionByZero);
    }

    #[test]
    fn test_postfix_square() {
        assert_eq!(preprocess("3²").unwrap(), "9");
        assert_eq!(preprocess("1+1.5²").unwrap(), "1+2.25");
        assert_eq!(preprocess("²").unwrap(), "²");
    }

    #[test]
    fn test_square_of_malformed_literal() {
        let err = preprocess("1.2.3²").unwrap_err();
        assert_eq!(err.root_cause(), &EvalError::InvalidNumber("1.2.3".to_string()));
    }

    #[test]
    fn test_square_root_then_square() {
        assert_eq!(preprocess("√(9)²").unwrap(), "9");
    }
}
