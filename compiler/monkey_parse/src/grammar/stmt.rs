//! Statements and blocks.

use std::rc::Rc;

use monkey_ir::{Block, ExprKind, Name, Stmt, StmtKind};
use monkey_lexer::Token;
use tracing::trace;

use super::expr::Precedence;
use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current() {
            Some(Token::Let) => self.parse_let(),
            Some(Token::Return) => self.parse_return(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let <ident> = <expr>;`
    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&Token::Let)?;
        let name = self.parse_binding_name()?;
        self.cursor.expect(&Token::Assign)?;
        let mut value = self.parse_expression(Precedence::Lowest)?;

        // Name the function so its body can refer to itself.
        if let ExprKind::Function(lit) = &mut value.kind {
            if let Some(lit) = Rc::get_mut(lit) {
                lit.name = Some(name.clone());
            }
        }

        self.cursor.eat(&Token::Semicolon);
        trace!(%name, "parsed let");
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Let { name, value }, span))
    }

    /// `return <expr>;`
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&Token::Return)?;
        let value = self.parse_expression(Precedence::Lowest)?;
        self.cursor.eat(&Token::Semicolon);
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.cursor.eat(&Token::Semicolon);
        let span = expr.span.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }

    /// `{ <stmt>* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.cursor.expect(&Token::LBrace)?;
        let mut statements = Vec::new();
        while !self.cursor.check(&Token::RBrace) && !self.cursor.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        let end = self.cursor.expect(&Token::RBrace)?;
        Ok(Block {
            statements,
            span: start.merge(end),
        })
    }

    pub(crate) fn parse_binding_name(&mut self) -> Result<Name, ParseError> {
        let span = self.cursor.current_span();
        match self.cursor.advance() {
            Some(token) => match token.value {
                Token::Ident(name) => Ok(Name::from(name)),
                other => Err(ParseError::UnexpectedToken {
                    expected: Token::Ident(String::new()).describe(),
                    found: other.describe(),
                    span,
                }),
            },
            None => Err(ParseError::UnexpectedEof {
                expected: Token::Ident(String::new()).describe(),
                span,
            }),
        }
    }
}
