//! Lexical scanning of primitive-operator expression text.
//!
//! The scanner is deliberately lenient: characters it does not recognise are
//! skipped without producing a token, so stray glyphs never abort a scan.

use std::fmt;

/// Binary operator kinds recognised by the tokenizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OperatorKind {
    /// Primitive text of this operator as it appears after canonicalization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        }
    }
}

/// A single lexical token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A run of digits and `.` characters, not validated.
    Number(String),
    Operator(OperatorKind),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) => f.write_str(text),
            Self::Operator(op) => f.write_str(op.as_str()),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// Whether `c` can be part of a numeric literal.
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Split `expr` into tokens, left to right.
///
/// Never fails. Malformed literals such as `1.2.3` come out as a single
/// `Number` token and are rejected later by the parser.
pub fn tokenize(expr: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if is_number_char(c) {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if !is_number_char(next) {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
            tokens.push(Token::Number(expr[start..end].to_string()));
            continue;
        }

        let token = match c {
            // `**` wins over a lone `*`
            '*' if chars.peek().is_some_and(|&(_, next)| next == '*') => {
                chars.next();
                Token::Operator(OperatorKind::Pow)
            }
            '*' => Token::Operator(OperatorKind::Mul),
            '+' => Token::Operator(OperatorKind::Add),
            '-' => Token::Operator(OperatorKind::Sub),
            '/' => Token::Operator(OperatorKind::Div),
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => continue,
        };
        tokens.push(token);
    }

    tokens
}

/// The numeric run at the very end of `text`, or `""` if `text` does not end
/// in a digit or `.`.
pub fn trailing_number(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_number_char(c))
        .last()
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}
