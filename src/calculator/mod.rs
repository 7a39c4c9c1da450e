//! Calculator engine for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Rewrite display glyphs and special functions (`√(…)`, `²`)
//! - Tokenize and evaluate expressions with operator precedence
//! - Format results for display
//! - Copy results to the clipboard

mod clipboard;
mod error;
mod evaluation;
mod format;
mod parser;
mod preprocess;
mod token;

pub use clipboard::copy_to_clipboard;
pub use error::EvalError;
pub use evaluation::{CalcResult, evaluate, evaluate_expression};
pub use format::format_result;
pub use parser::parse;
pub use preprocess::{SQRT_GLYPH, SQUARE_GLYPH, canonicalize, preprocess};
pub use token::{OperatorKind, Token, is_number_char, tokenize, trailing_number};
