//! Failure taxonomy shared by every stage of the equation pipeline.
//!
//! Every failure is fatal for the equation being processed. The pipeline stops at the
//! first one and hands it to the caller together with the source column that caused it,
//! so the caller can print a caret under the offending character.
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Which stage of the pipeline rejected the equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ErrorKind {
    /// a character that belongs to no lexical class
    LexError,
    /// grammar-level problems: parentheses, arity, several `=`, powers out of range
    ValidationError,
    /// structural problems while building the expression tree
    TreeError,
    /// algebra the evaluator refuses to carry out
    SimplificationError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquationError {
    pub kind: ErrorKind,
    pub message: String,
    /// character column in the source string, if the failure can be tied to one
    pub position: Option<usize>,
}

impl EquationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Option<usize>) -> Self {
        EquationError {
            kind,
            message: message.into(),
            position,
        }
    }

    pub fn lex(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::LexError, message, Some(position))
    }

    pub fn validation(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::new(ErrorKind::ValidationError, message, position)
    }

    pub fn tree(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::new(ErrorKind::TreeError, message, position)
    }

    pub fn simplification(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::SimplificationError, message, Some(position))
    }

    /// Renders the message under the source line: spaces up to the column, a caret, the message.
    /// Errors without a position render just the message.
    pub fn caret(&self) -> String {
        match self.position {
            Some(position) => format!("{}^ {}", " ".repeat(position), self.message),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for EquationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at position {}: {}", self.kind, position, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for EquationError {}
