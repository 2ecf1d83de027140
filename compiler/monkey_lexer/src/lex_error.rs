//! Lexer errors.

use monkey_ir::Span;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {found:?}")]
    UnexpectedChar { found: char, span: Span },
    #[error("could not parse {text} as integer")]
    IntegerOutOfRange { text: String, span: Span },
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
}

impl LexError {
    /// Build the error for a slice that `logos` rejected.
    pub(crate) fn classify(slice: &str, span: Span) -> Self {
        match slice.chars().next() {
            Some(c) if c.is_ascii_digit() => LexError::IntegerOutOfRange {
                text: slice.to_string(),
                span,
            },
            Some('"') => LexError::UnterminatedString { span },
            Some(found) => LexError::UnexpectedChar { found, span },
            None => LexError::UnexpectedChar { found: '\0', span },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::IntegerOutOfRange { span, .. }
            | LexError::UnterminatedString { span } => *span,
        }
    }
}
