//! Expressions: Pratt parsing with one prefix rule per leading token and one
//! infix rule per operator token.

use std::rc::Rc;

use monkey_ir::{BinaryOp, Expr, ExprKind, FunctionLit, Span, UnaryOp};
use monkey_lexer::Token;
use monkey_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

/// Binding power, weakest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/` `%`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `xs[i]`
    Index,
}

fn infix_precedence(token: &Token) -> Precedence {
    match token {
        Token::Eq | Token::NotEq => Precedence::Equals,
        Token::Lt | Token::Gt => Precedence::LessGreater,
        Token::Plus | Token::Minus => Precedence::Sum,
        Token::Asterisk | Token::Slash | Token::Percent => Precedence::Product,
        Token::LParen => Precedence::Call,
        Token::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn binary_op(token: &Token) -> Option<BinaryOp> {
    Some(match token {
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Asterisk => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::Percent => BinaryOp::Mod,
        Token::Lt => BinaryOp::Lt,
        Token::Gt => BinaryOp::Gt,
        Token::Eq => BinaryOp::Eq,
        Token::NotEq => BinaryOp::NotEq,
        _ => return None,
    })
}

impl Parser {
    pub(crate) fn parse_expression(&mut self, min: Precedence) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;
            while let Some(token) = self.cursor.current() {
                if *token == Token::Semicolon || infix_precedence(token) <= min {
                    break;
                }
                left = self.parse_infix(left)?;
            }
            Ok(left)
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        let Some(token) = self.cursor.advance() else {
            return Err(ParseError::UnexpectedEof {
                expected: "expression",
                span,
            });
        };
        trace!(token = %token.value, "prefix");

        match token.value {
            Token::Int(n) => Ok(Expr::new(ExprKind::Int(n), span)),
            Token::Str(s) => Ok(Expr::new(ExprKind::Str(s), span)),
            Token::True => Ok(Expr::new(ExprKind::Bool(true), span)),
            Token::False => Ok(Expr::new(ExprKind::Bool(false), span)),
            Token::Ident(name) => Ok(Expr::new(ExprKind::Ident(name.into()), span)),
            Token::Bang => self.parse_prefix_operator(UnaryOp::Not, span),
            Token::Minus => self.parse_prefix_operator(UnaryOp::Neg, span),
            Token::LParen => {
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.cursor.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::LBracket => {
                let items = self.parse_expression_list(&Token::RBracket)?;
                Ok(Expr::new(
                    ExprKind::Array(items),
                    span.merge(self.cursor.previous_span()),
                ))
            }
            Token::If => self.parse_if(span),
            Token::Function => self.parse_function(span),
            other => Err(ParseError::NoPrefixRule {
                found: other.describe(),
                span,
            }),
        }
    }

    fn parse_prefix_operator(&mut self, op: UnaryOp, start: Span) -> Result<Expr, ParseError> {
        let operand = self.parse_expression(Precedence::Prefix)?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Prefix {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_infix(&mut self, left: Expr) -> Result<Expr, ParseError> {
        let Some(token) = self.cursor.advance() else {
            return Ok(left);
        };

        if let Some(op) = binary_op(&token.value) {
            let right = self.parse_expression(infix_precedence(&token.value))?;
            let span = left.span.merge(right.span);
            return Ok(Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            ));
        }

        match token.value {
            Token::LParen => {
                let args = self.parse_expression_list(&Token::RParen)?;
                let span = left.span.merge(self.cursor.previous_span());
                Ok(Expr::new(
                    ExprKind::Call {
                        callee: Box::new(left),
                        args,
                    },
                    span,
                ))
            }
            Token::LBracket => {
                let index = self.parse_expression(Precedence::Lowest)?;
                let end = self.cursor.expect(&Token::RBracket)?;
                let span = left.span.merge(end);
                Ok(Expr::new(
                    ExprKind::Index {
                        base: Box::new(left),
                        index: Box::new(index),
                    },
                    span,
                ))
            }
            // Only tokens with an infix precedence reach here.
            _ => Ok(left),
        }
    }

    /// Comma-separated expressions up to `close`; the opening token is
    /// already consumed.
    fn parse_expression_list(&mut self, close: &Token) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.cursor.eat(close) {
            return Ok(items);
        }
        items.push(self.parse_expression(Precedence::Lowest)?);
        while self.cursor.eat(&Token::Comma) {
            items.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.cursor.expect(close)?;
        Ok(items)
    }

    /// `if <cond> { ... } [else { ... }]`; the `if` is already consumed.
    fn parse_if(&mut self, start: Span) -> Result<Expr, ParseError> {
        let condition = self.parse_expression(Precedence::Lowest)?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.cursor.eat(&Token::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        let end = else_branch.as_ref().map_or(then_branch.span, |b| b.span);
        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                then_branch,
                else_branch,
            },
            start.merge(end),
        ))
    }

    /// `fn(<params>) { ... }`; the `fn` is already consumed.
    fn parse_function(&mut self, start: Span) -> Result<Expr, ParseError> {
        self.cursor.expect(&Token::LParen)?;
        let mut params = Vec::new();
        if !self.cursor.eat(&Token::RParen) {
            params.push(self.parse_binding_name()?);
            while self.cursor.eat(&Token::Comma) {
                params.push(self.parse_binding_name()?);
            }
            self.cursor.expect(&Token::RParen)?;
        }
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Expr::new(
            ExprKind::Function(Rc::new(FunctionLit {
                name: None,
                params,
                body,
            })),
            span,
        ))
    }
}
