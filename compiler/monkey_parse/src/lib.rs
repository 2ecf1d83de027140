//! Parser for Monkey programs.
//!
//! A Pratt parser over the token vector produced by `monkey_lexer`. Parsing
//! never stops at the first error: a failed statement is recorded and the
//! parser resynchronises after the next `;`, so the driver can report every
//! problem in the input at once.
//!
//! # Entry points
//!
//! - [`parse`]: lex and parse source text, all-or-nothing
//! - [`Parser::parse_program`]: parse pre-lexed tokens, keeping partial output

mod cursor;
mod error;
mod grammar;

pub use error::ParseError;

use monkey_ir::Program;
use monkey_lexer::SpannedToken;

use cursor::Cursor;

/// Result of parsing a token stream: the statements that parsed plus the
/// errors for those that did not.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct Parser {
    cursor: Cursor,
    errors: Vec<ParseError>,
}

impl Parser {
    /// `source_len` places end-of-input errors after the last byte.
    pub fn new(tokens: Vec<SpannedToken>, source_len: usize) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source_len),
            errors: Vec::new(),
        }
    }

    /// Parse every statement up to end of input.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    tracing::debug!(%err, "statement failed to parse");
                    self.errors.push(err);
                    self.cursor.synchronize();
                }
            }
        }
        ParseOutput {
            program: Program { statements },
            errors: self.errors,
        }
    }
}

/// Lex and parse `source`.
///
/// Returns every error found; a lexing error stops before parsing starts.
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    let tokens = monkey_lexer::lex(source).map_err(|err| vec![ParseError::from(err)])?;
    let output = Parser::new(tokens, source.len()).parse_program();
    if output.has_errors() {
        Err(output.errors)
    } else {
        Ok(output.program)
    }
}
