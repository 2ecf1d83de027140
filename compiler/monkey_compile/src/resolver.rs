//! Name resolution over a whole program.
//!
//! Walks the syntax tree in the order a code generator would, entering a
//! [`SymbolTable`] per function literal, and records the symbol every
//! identifier resolves to along with the layout of every function.

use std::mem;

use thiserror::Error;
use tracing::{debug, trace};

use monkey_eval::Builtin;
use monkey_ir::{Block, Expr, ExprKind, FunctionLit, Name, Program, Span, Stmt, StmtKind};
use monkey_stack::ensure_sufficient_stack;

use crate::{Symbol, SymbolTable};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("undefined variable {name}")]
    Undefined { name: Name, span: Span },
}

impl ResolveError {
    pub fn span(&self) -> Span {
        match self {
            ResolveError::Undefined { span, .. } => *span,
        }
    }
}

/// One identifier use and what it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: Name,
    pub span: Span,
    pub symbol: Symbol,
}

/// Layout of one function literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionScope {
    /// The `let` name the literal is bound to, if any.
    pub name: Option<Name>,
    pub span: Span,
    /// Slots used by parameters and `let`s in the body.
    pub num_locals: usize,
    /// Captured symbols, as seen from the enclosing function.
    pub free_symbols: Vec<Symbol>,
}

/// Everything the resolver found, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub names: Vec<ResolvedName>,
    /// Function literals in the order they finish resolving, so inner
    /// functions come before the function containing them.
    pub functions: Vec<FunctionScope>,
    pub num_globals: usize,
    pub errors: Vec<ResolveError>,
}

impl Resolution {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct Resolver {
    table: SymbolTable,
    out: Resolution,
}

/// Resolve every identifier of `program`.
///
/// The outermost table starts with every builtin at its registry index.
/// Unresolved names are reported and resolution carries on.
pub fn resolve_program(program: &Program) -> Resolution {
    let mut table = SymbolTable::new();
    for builtin in Builtin::ALL {
        table.define_builtin(builtin.index(), Name::from(builtin.name()));
    }

    let mut resolver = Resolver {
        table,
        out: Resolution::default(),
    };
    for stmt in &program.statements {
        resolver.resolve_stmt(stmt);
    }

    let mut out = resolver.out;
    out.num_globals = resolver.table.num_definitions();
    debug!(
        names = out.names.len(),
        functions = out.functions.len(),
        errors = out.errors.len(),
        "resolved program"
    );
    out
}

impl Resolver {
    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                // Defined first so the value can refer to the binding.
                self.table.define(name.clone());
                self.resolve_expr(value);
            }
            StmtKind::Return(value) | StmtKind::Expr(value) => self.resolve_expr(value),
        }
    }

    fn resolve_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        ensure_sufficient_stack(|| self.resolve_expr_inner(expr));
    }

    fn resolve_expr_inner(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Int(_) | ExprKind::Bool(_) | ExprKind::Str(_) => {}
            ExprKind::Ident(name) => self.resolve_name(name, expr.span),
            ExprKind::Array(items) => items.iter().for_each(|item| self.resolve_expr(item)),
            ExprKind::Prefix { operand, .. } => self.resolve_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_block(else_branch);
                }
            }
            ExprKind::Function(literal) => self.resolve_function(literal, expr.span),
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee);
                args.iter().for_each(|arg| self.resolve_expr(arg));
            }
            ExprKind::Index { base, index } => {
                self.resolve_expr(base);
                self.resolve_expr(index);
            }
        }
    }

    fn resolve_name(&mut self, name: &Name, span: Span) {
        match self.table.resolve(name) {
            Some(symbol) => {
                trace!(%symbol, "resolved");
                self.out.names.push(ResolvedName {
                    name: name.clone(),
                    span,
                    symbol,
                });
            }
            None => self.out.errors.push(ResolveError::Undefined {
                name: name.clone(),
                span,
            }),
        }
    }

    fn resolve_function(&mut self, literal: &FunctionLit, span: Span) {
        self.enter_scope();
        if let Some(name) = &literal.name {
            self.table.define_function_self(name.clone());
        }
        for param in &literal.params {
            self.table.define(param.clone());
        }
        self.resolve_block(&literal.body);

        let scope = FunctionScope {
            name: literal.name.clone(),
            span,
            num_locals: self.table.num_definitions(),
            free_symbols: self.table.free_symbols().to_vec(),
        };
        self.leave_scope();
        self.out.functions.push(scope);
    }

    fn enter_scope(&mut self) {
        let outer = mem::take(&mut self.table);
        self.table = SymbolTable::enclosed(outer);
    }

    fn leave_scope(&mut self) {
        let inner = mem::take(&mut self.table);
        if let Some(outer) = inner.into_outer() {
            self.table = outer;
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
