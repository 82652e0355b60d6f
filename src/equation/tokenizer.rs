//! Scanner turning the raw equation string into positioned tokens.
//!
//! One anchored pattern is tried at the current offset, the first alternative that matches
//! wins and the offset moves past it. Whitespace runs are emitted as tokens too, so the
//! consumer gets a sequence that covers every character of the input.
use crate::equation::errors::EquationError;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use strum_macros::{Display, EnumIter};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<num>[0-9]+\.?[0-9]*|\.[0-9]+)|(?P<var>[xX])|(?P<op>[-+*/^])|(?P<lpar>\()|(?P<rpar>\))|(?P<eq>=)|(?P<ws>\s+))",
    )
    .expect("token pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Operators of the equation grammar. The two unary variants never come out of the
/// scanner: the converter re-tags `+`/`-` once it knows a binary operator cannot stand there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "^")]
    Pow,
    #[strum(serialize = "u-")]
    UnaryMinus,
    #[strum(serialize = "u+")]
    UnaryPlus,
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Operator::UnaryMinus | Operator::UnaryPlus => 5,
            Operator::Pow => 4,
            Operator::Mul | Operator::Div => 3,
            Operator::Add | Operator::Sub => 2,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            Operator::UnaryMinus | Operator::UnaryPlus | Operator::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, Operator::UnaryMinus | Operator::UnaryPlus)
    }

    /// unary counterpart of a sign operator
    pub fn to_unary(self) -> Option<Operator> {
        match self {
            Operator::Sub => Some(Operator::UnaryMinus),
            Operator::Add => Some(Operator::UnaryPlus),
            _ => None,
        }
    }

    fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            "^" => Some(Operator::Pow),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Variable,
    Operator(Operator),
    LeftParen,
    RightParen,
    Equals,
    Whitespace,
}

/// A lexeme together with the column of its first character in the source string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Token that does not come from the source, e.g. an implicit `*`
    pub fn synthetic(kind: TokenKind, position: usize) -> Self {
        let text = match kind {
            TokenKind::Number(value) => value.to_string(),
            TokenKind::Variable => "x".to_string(),
            TokenKind::Operator(op) => op.to_string(),
            TokenKind::LeftParen => "(".to_string(),
            TokenKind::RightParen => ")".to_string(),
            TokenKind::Equals => "=".to_string(),
            TokenKind::Whitespace => " ".to_string(),
        };
        Token {
            kind,
            text,
            position,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Operator(op) => write!(f, "{}", op),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Lazy token stream over an equation. Cloning it gives an independent scanner that
/// starts from wherever the cloned scanner stood, `Tokenizer::new` always starts from scratch.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    /// byte offset into `input`
    offset: usize,
    /// character column of `offset`; token positions and errors use this
    column: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            offset: 0,
            column: 0,
            failed: false,
        }
    }

    fn scan(&mut self) -> Result<Token, EquationError> {
        let rest = &self.input[self.offset..];
        let Some(caps) = TOKEN_PATTERN.captures(rest) else {
            let unknown = rest.chars().next().unwrap_or(' ');
            return Err(EquationError::lex(
                format!("unknown character '{}'", unknown),
                self.column,
            ));
        };
        let position = self.column;
        let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        self.offset += whole.len();
        self.column += whole.chars().count();

        let kind = if let Some(num) = caps.name("num") {
            let value = num
                .as_str()
                .parse::<f64>()
                .map_err(|_| EquationError::lex(format!("malformed number '{}'", num.as_str()), position))?;
            TokenKind::Number(value)
        } else if caps.name("var").is_some() {
            TokenKind::Variable
        } else if let Some(op) = caps.name("op") {
            match Operator::from_symbol(op.as_str()) {
                Some(op) => TokenKind::Operator(op),
                None => return Err(EquationError::lex(format!("unknown operator '{}'", op.as_str()), position)),
            }
        } else if caps.name("lpar").is_some() {
            TokenKind::LeftParen
        } else if caps.name("rpar").is_some() {
            TokenKind::RightParen
        } else if caps.name("eq").is_some() {
            TokenKind::Equals
        } else {
            TokenKind::Whitespace
        };
        Ok(Token::new(kind, whole, position))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, EquationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.input.len() {
            return None;
        }
        let token = self.scan();
        if token.is_err() {
            self.failed = true;
        }
        Some(token)
    }
}

/// Scans the whole equation, stopping at the first unknown character.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EquationError> {
    Tokenizer::new(input).collect()
}
