//! Lexer for Monkey source text.
//!
//! Tokens are derived with `logos`. [`lex`] turns a whole source string into
//! a vector of [`Spanned`] tokens, stopping at the first character that
//! starts no token.

mod lex_error;
mod token;

pub use lex_error::LexError;
pub use token::Token;

use logos::Logos;
use monkey_ir::Span;

/// A token together with its location in the source.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

pub type SpannedToken = Spanned<Token>;

/// Tokenize `source`.
pub fn lex(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(value) => tokens.push(Spanned { value, span }),
            Err(()) => return Err(LexError::classify(lexer.slice(), span)),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests;
