//! Expression evaluation entry points.
//!
//! [`evaluate`] drives the whole pipeline (preprocess, tokenize, parse) and is
//! also what the square-root rewrite calls back into for its inner text.

use super::error::EvalError;
use super::format::format_result;
use super::parser::parse;
use super::preprocess::preprocess;
use super::token::tokenize;

/// Evaluate an expression written with user glyphs.
///
/// Every failure comes back as [`EvalError::InvalidExpression`] wrapping the
/// underlying cause.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let primitive = preprocess(expression).map_err(EvalError::into_invalid)?;
    let tokens = tokenize(&primitive);
    let value = parse(&tokens).map_err(EvalError::into_invalid)?;
    tracing::debug!(expression, primitive = %primitive, value, "evaluated");
    Ok(value)
}

/// Result of evaluating a calculator expression in one shot.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// The expression produced a number.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// The value as shown to the user.
        display: String,
    },
    /// The expression could not be evaluated.
    Error {
        /// The original expression.
        expression: String,
        /// Why evaluation failed.
        error: EvalError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The display string: the formatted value, or `Error`.
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display, .. } => display,
            Self::Error { .. } => "Error",
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&EvalError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }
}

/// Evaluate `input` and format the outcome.
pub fn evaluate_expression(input: &str) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(&expression) {
        Ok(value) => CalcResult::Success {
            display: format_result(value),
            expression,
            value,
        },
        Err(error) => CalcResult::Error { expression, error },
    }
}
