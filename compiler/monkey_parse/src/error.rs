//! Parse errors.

use monkey_ir::Span;
use monkey_lexer::LexError;
use thiserror::Error;

/// A syntax error with the location it was detected at.
///
/// Messages keep the wording the REPL has always printed, e.g.
/// `expected next token to be =, got INT instead`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    #[error("expected next token to be {expected}, got end of input instead")]
    UnexpectedEof { expected: &'static str, span: Span },
    #[error("no prefix parse function for {found} found")]
    NoPrefixRule { found: &'static str, span: Span },
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::NoPrefixRule { span, .. } => *span,
            ParseError::Lex(err) => err.span(),
        }
    }
}
