//! Monkey IR - syntax tree types for the Monkey language.
//!
//! The parser produces a [`Program`]; the evaluator and the resolver in
//! `monkey_compile` consume it. Everything here is plain data:
//!
//! - [`Name`]: a cheaply clonable identifier
//! - [`Span`]: byte range into the source text
//! - [`BinaryOp`] / [`UnaryOp`]: operator enums
//! - [`Program`], [`Stmt`], [`Block`], [`Expr`], [`FunctionLit`]: the tree
//!
//! Every node implements `Display`, printing the canonical fully
//! parenthesised form (`(5 + (2 * 3))`).

mod ast;
mod name;
mod operators;
mod span;

pub use ast::{Block, Expr, ExprKind, FunctionLit, Program, Stmt, StmtKind};
pub use name::Name;
pub use operators::{BinaryOp, UnaryOp};
pub use span::Span;
