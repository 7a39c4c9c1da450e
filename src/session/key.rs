//! Key events delivered by the presentation layer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Binary operators as the user enters them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// Glyph written into the expression text.
    pub fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '×',
            Self::Div => '÷',
            Self::Pow => '^',
        }
    }

    /// Whether `c` is the glyph of any operator.
    pub fn is_glyph(c: char) -> bool {
        Self::ALL.iter().any(|op| op.glyph() == c)
    }
}

/// Functions applied directly to the displayed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFunction {
    /// Sine, operand in degrees.
    Sin,
    /// Cosine, operand in degrees.
    Cos,
    /// Tangent, operand in degrees.
    Tan,
    /// Natural log; NaN for non-positive operands.
    Ln,
    Negate,
    /// Divide by 100.
    Percent,
    /// Square root; NaN for negative operands.
    Sqrt,
    Square,
}

impl UnaryFunction {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.to_radians().sin(),
            Self::Cos => x.to_radians().cos(),
            Self::Tan => x.to_radians().tan(),
            Self::Ln if x > 0.0 => x.ln(),
            Self::Ln => f64::NAN,
            Self::Negate => -x,
            Self::Percent => x / 100.0,
            Self::Sqrt if x >= 0.0 => x.sqrt(),
            Self::Sqrt => f64::NAN,
            Self::Square => x * x,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Negate => "neg",
            Self::Percent => "%",
            Self::Sqrt => "sqrt",
            Self::Square => "sq",
        }
    }
}

/// One user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A decimal digit, `0..=9`.
    Digit(u8),
    Operator(Operator),
    /// Open or close a group, whichever balances the expression.
    Paren,
    Decimal,
    Backspace,
    Clear,
    Equals,
    Function(UnaryFunction),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key: {0:?}")]
pub struct KeyParseError(pub String);

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Sub),
            "*" | "x" | "×" => Self::Operator(Operator::Mul),
            "/" | "÷" => Self::Operator(Operator::Div),
            "^" | "pow" => Self::Operator(Operator::Pow),
            "()" | "paren" => Self::Paren,
            "." => Self::Decimal,
            "back" | "backspace" | "⌫" => Self::Backspace,
            "C" | "c" | "clear" => Self::Clear,
            "=" => Self::Equals,
            "sin" => Self::Function(UnaryFunction::Sin),
            "cos" => Self::Function(UnaryFunction::Cos),
            "tan" => Self::Function(UnaryFunction::Tan),
            "ln" => Self::Function(UnaryFunction::Ln),
            "neg" | "±" | "+/-" => Self::Function(UnaryFunction::Negate),
            "%" => Self::Function(UnaryFunction::Percent),
            "sqrt" | "√" => Self::Function(UnaryFunction::Sqrt),
            "sq" | "x²" => Self::Function(UnaryFunction::Square),
            _ => {
                let mut chars = s.chars();
                match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                    (Some(d), None) => Self::Digit(d as u8),
                    _ => return Err(KeyParseError(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Operator(op) => write!(f, "{}", op.glyph()),
            Self::Paren => f.write_str("()"),
            Self::Decimal => f.write_str("."),
            Self::Backspace => f.write_str("back"),
            Self::Clear => f.write_str("C"),
            Self::Equals => f.write_str("="),
            Self::Function(func) => f.write_str(func.name()),
        }
    }
}

/// Parse a whitespace-separated key sequence such as `"1 2 + 7 ="`.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyParseError> {
    input.split_whitespace().map(str::parse).collect()
}
