//! Token cursor.

use std::mem;

use monkey_ir::Span;
use monkey_lexer::{SpannedToken, Token};
use tracing::trace;

use crate::ParseError;

pub(crate) struct Cursor {
    tokens: Vec<SpannedToken>,
    pos: usize,
    /// Zero-width span just past the last byte of the source.
    end: Span,
}

impl Cursor {
    pub(crate) fn new(tokens: Vec<SpannedToken>, source_len: usize) -> Self {
        let end = Span::from_range(source_len..source_len);
        Cursor {
            tokens,
            pos: 0,
            end,
        }
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.value)
    }

    /// Span of the current token, or the end-of-input span.
    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.tokens.get(self.pos).map_or(self.end, |t| t.span)
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.end, |t| t.span)
    }

    pub(crate) fn advance(&mut self) -> Option<SpannedToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Same token kind, ignoring literal payloads.
    #[inline]
    pub(crate) fn check(&self, kind: &Token) -> bool {
        self.current()
            .is_some_and(|t| mem::discriminant(t) == mem::discriminant(kind))
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: &Token) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail.
    pub(crate) fn expect(&mut self, kind: &Token) -> Result<Span, ParseError> {
        match self.tokens.get(self.pos) {
            Some(t) if mem::discriminant(&t.value) == mem::discriminant(kind) => {
                self.pos += 1;
                Ok(t.span)
            }
            Some(t) => Err(ParseError::UnexpectedToken {
                expected: kind.describe(),
                found: t.value.describe(),
                span: t.span,
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: kind.describe(),
                span: self.end,
            }),
        }
    }

    /// Skip past the next `;` (or to end of input) after an error.
    pub(crate) fn synchronize(&mut self) {
        let start = self.pos;
        while let Some(token) = self.advance() {
            if token.value == Token::Semicolon {
                break;
            }
        }
        trace!(skipped = self.pos - start, "resynchronized");
    }
}
