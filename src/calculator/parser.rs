//! Recursive-descent evaluation of a token stream.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := power (('*' | '/') power)*
//! power  := factor ('**' power)?
//! factor := '(' expr ')' | '-' factor | '+' factor | number
//! ```
//!
//! Values are computed while parsing; no tree is built.

use super::error::EvalError;
use super::token::{OperatorKind, Token};

/// Recursion limit for groups, unary signs and exponent chains.
pub const MAX_DEPTH: usize = 256;

/// Evaluate a complete token sequence.
///
/// Tokens left over after the top-level expression (an extra `)` for
/// instance) are ignored.
pub fn parse(tokens: &[Token]) -> Result<f64, EvalError> {
    let mut parser = Parser::new(tokens);
    let value = parser.expr()?;
    if parser.pos < tokens.len() {
        tracing::trace!(
            consumed = parser.pos,
            total = tokens.len(),
            "ignoring trailing tokens"
        );
    }
    Ok(value)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Result<f64, EvalError>) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Consume the next token if it is one of `ops`.
    fn eat_operator(&mut self, ops: &[OperatorKind]) -> Option<OperatorKind> {
        match self.peek() {
            Some(Token::Operator(op)) if ops.contains(op) => {
                self.pos += 1;
                Some(*op)
            }
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut result = self.term()?;
        while let Some(op) = self.eat_operator(&[OperatorKind::Add, OperatorKind::Sub]) {
            let right = self.term()?;
            result = if op == OperatorKind::Add {
                result + right
            } else {
                result - right
            };
        }
        Ok(result)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut result = self.power()?;
        while let Some(op) = self.eat_operator(&[OperatorKind::Mul, OperatorKind::Div]) {
            let right = self.power()?;
            result = if op == OperatorKind::Mul {
                result * right
            } else {
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                result / right
            };
        }
        Ok(result)
    }

    /// Exponentiation binds right to left: `2**3**2` is `2**9`.
    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.factor()?;
        if self.eat_operator(&[OperatorKind::Pow]).is_some() {
            let exponent = self.nested(Self::power)?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        let token = self.next().ok_or(EvalError::UnexpectedEnd)?;
        match token {
            Token::LParen => {
                let value = self.nested(Self::expr)?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(EvalError::UnbalancedParen),
                }
            }
            Token::Operator(OperatorKind::Sub) => Ok(-self.nested(Self::factor)?),
            Token::Operator(OperatorKind::Add) => self.nested(Self::factor),
            Token::Number(text) => text
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidNumber(text.clone())),
            other => Err(EvalError::InvalidNumber(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::token::tokenize;

    fn eval(expr: &str) -> Result<f64, EvalError> {
        parse(&tokenize(expr))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2+3*4"), Ok(14.0));
        assert_eq!(eval("(2+3)*4"), Ok(20.0));
        assert_eq!(eval("2*3**2"), Ok(18.0));
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("10-4-3"), Ok(3.0));
        assert_eq!(eval("64/4/2"), Ok(8.0));
    }

    #[test]
    fn test_power_uses_right_operand() {
        assert_eq!(eval("2**3"), Ok(8.0));
        assert_eq!(eval("2**10"), Ok(1024.0));
        assert_eq!(eval("(1+2)**2"), Ok(9.0));
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(eval("2**3**2"), Ok(512.0));
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval("--5"), Ok(5.0));
        assert_eq!(eval("-+-5"), Ok(5.0));
        assert_eq!(eval("3*-2"), Ok(-6.0));
        assert_eq!(eval("-(1+1)"), Ok(-2.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1+5/(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("0/5"), Ok(0.0));
    }

    #[test]
    fn test_unbalanced_paren() {
        assert_eq!(eval("(2+3"), Err(EvalError::UnbalancedParen));
        assert_eq!(eval("((1)"), Err(EvalError::UnbalancedParen));
    }

    #[test]
    fn test_unexpected_end() {
        assert_eq!(eval(""), Err(EvalError::UnexpectedEnd));
        assert_eq!(eval("2+"), Err(EvalError::UnexpectedEnd));
        assert_eq!(eval("-"), Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            eval("1.2.3+1"),
            Err(EvalError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(eval("*2"), Err(EvalError::InvalidNumber("*".to_string())));
        assert_eq!(eval(")"), Err(EvalError::InvalidNumber(")".to_string())));
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        assert_eq!(eval("2+3)"), Ok(5.0));
        assert_eq!(eval("4 5"), Ok(4.0));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(eval(&deep), Err(EvalError::TooDeep(MAX_DEPTH)));

        let signs = format!("{}1", "-".repeat(10_000));
        assert_eq!(eval(&signs), Err(EvalError::TooDeep(MAX_DEPTH)));

        let chain = vec!["1"; MAX_DEPTH + 2].join("**");
        assert_eq!(eval(&chain), Err(EvalError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn test_nesting_within_limit() {
        let ok = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&ok), Ok(7.0));
        assert_eq!(eval(&format!("{}5", "-".repeat(100))), Ok(5.0));
    }

    #[test]
    fn test_lenient_decimal_literals() {
        assert_eq!(eval(".5+5."), Ok(5.5));
    }
}
