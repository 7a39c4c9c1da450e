//! Errors produced while evaluating an expression.

use thiserror::Error;

/// Failure raised by the parser or the special-function preprocessor.
///
/// The tokenizer and the formatter never fail; everything that can go wrong
/// with user input surfaces here.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// A factor was expected but the token stream was exhausted.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A closing parenthesis was missing or mismatched.
    #[error("missing closing parenthesis")]
    UnbalancedParen,

    /// A token in number position did not parse as a decimal literal.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// The right operand of `/` was exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Parentheses, unary signs or `**` chained past the parser's limit.
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),

    /// Catch-all handed to callers of [`evaluate`](super::evaluate).
    #[error("invalid expression: {0}")]
    InvalidExpression(#[source] Box<EvalError>),
}

impl EvalError {
    /// Wrap this error as [`EvalError::InvalidExpression`].
    ///
    /// Already-wrapped errors are returned unchanged, so nested evaluations
    /// never stack wrappers.
    pub fn into_invalid(self) -> Self {
        if matches!(self, Self::InvalidExpression(_)) {
            self
        } else {
            Self::InvalidExpression(Box::new(self))
        }
    }

    /// The innermost error, looking through any `InvalidExpression` wrapper.
    pub fn root_cause(&self) -> &EvalError {
        match self {
            Self::InvalidExpression(inner) => inner.root_cause(),
            other => other,
        }
    }

    /// Short machine-friendly name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self.root_cause() {
            Self::UnexpectedEnd => "unexpected_end",
            Self::UnbalancedParen => "unbalanced_paren",
            Self::InvalidNumber(_) => "invalid_number",
            Self::DivisionByZero => "division_by_zero",
            Self::TooDeep(_) => "too_deep",
            Self::InvalidExpression(_) => "invalid_expression",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_is_idempotent() {
        let err = EvalError::DivisionByZero.into_invalid().into_invalid();
        assert_eq!(
            err,
            EvalError::InvalidExpression(Box::new(EvalError::DivisionByZero))
        );
        assert_eq!(err.root_cause(), &EvalError::DivisionByZero);
    }

    #[test]
    fn test_kind_looks_through_wrapper() {
        let err = EvalError::InvalidNumber("1.2.3".to_string()).into_invalid();
        assert_eq!(err.kind(), "invalid_number");
        assert_eq!(err.to_string(), "invalid expression: invalid number: 1.2.3");
    }
}
