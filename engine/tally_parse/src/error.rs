//! Parse error type.

use thiserror::Error;

/// A syntax error with the byte position of the offending input.
///
/// Fatal to the current parse attempt only; the engine and any previously
/// parsed expressions are unaffected.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("syntax error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}
