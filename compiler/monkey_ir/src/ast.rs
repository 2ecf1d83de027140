//! Syntax tree for Monkey programs.
//!
//! Nodes own their children except function literals, which sit behind an
//! `Rc` so a runtime function value can share its body with the tree.
//!
//! Nesting depth is bounded only by the input, so dropping and printing an
//! [`Expr`] never recurse on the native stack without a guard.

use std::fmt;
use std::mem;
use std::rc::Rc;

use monkey_stack::ensure_sufficient_stack;

use crate::{BinaryOp, Name, Span, UnaryOp};

/// A whole source file or REPL input.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A statement with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let name = value;`
    Let { name: Name, value: Expr },
    /// `return value;`
    Return(Expr),
    /// An expression used as a statement; its value is the statement's value.
    Expr(Expr),
}

/// `{ ... }` body of an `if` branch or a function.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// An expression with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Bool(bool),
    Str(String),
    Ident(Name),
    Array(Vec<Expr>),
    Prefix {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    Function(Rc<FunctionLit>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
}

/// `fn(params) { body }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLit {
    /// Set by the parser when the literal is the direct value of a `let`,
    /// so the function can refer to itself by that name.
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: Block,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Childless node left behind when a subtree is moved out during drop.
    fn vacant() -> Self {
        Expr::new(ExprKind::Bool(false), Span::DUMMY)
    }
}

/// Tears the subtree down with an explicit worklist.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.kind.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.kind.take_children(&mut pending);
        }
    }
}

impl ExprKind {
    /// Move every directly nested expression into `out`.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            ExprKind::Int(_) | ExprKind::Bool(_) | ExprKind::Str(_) | ExprKind::Ident(_) => {}
            ExprKind::Array(items) => out.append(items),
            ExprKind::Prefix { operand, .. } => out.push(take_boxed(operand)),
            ExprKind::Binary { left, right, .. } => {
                out.push(take_boxed(left));
                out.push(take_boxed(right));
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push(take_boxed(condition));
                then_branch.take_exprs(out);
                if let Some(else_branch) = else_branch {
                    else_branch.take_exprs(out);
                }
            }
            // A literal still shared with a runtime closure is torn down by
            // whichever owner drops it last.
            ExprKind::Function(lit) => {
                if let Some(lit) = Rc::get_mut(lit) {
                    lit.body.take_exprs(out);
                }
            }
            ExprKind::Call { callee, args } => {
                out.push(take_boxed(callee));
                out.append(args);
            }
            ExprKind::Index { base, index } => {
                out.push(take_boxed(base));
                out.push(take_boxed(index));
            }
        }
    }
}

fn take_boxed(slot: &mut Expr) -> Expr {
    mem::replace(slot, Expr::vacant())
}

impl Block {
    fn take_exprs(&mut self, out: &mut Vec<Expr>) {
        out.extend(self.statements.drain(..).map(|stmt| match stmt.kind {
            StmtKind::Let { value, .. } | StmtKind::Return(value) | StmtKind::Expr(value) => value,
        }));
    }
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    #[inline]
    pub fn is_let(&self) -> bool {
        matches!(self.kind, StmtKind::Let { .. })
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, " ")
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, " ")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let { name, value } => write!(f, "let {name} = {value};"),
            StmtKind::Return(value) => write!(f, "return {value};"),
            StmtKind::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for FunctionLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        write_joined(f, &self.params, ", ")?;
        write!(f, ") {{ {} }}", self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_kind(f))
    }
}

impl Expr {
    fn fmt_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Int(n) => write!(f, "{n}"),
            ExprKind::Bool(b) => write!(f, "{b}"),
            ExprKind::Str(s) => write!(f, "\"{s}\""),
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::Array(items) => {
                f.write_str("[")?;
                write_joined(f, items, ", ")?;
                f.write_str("]")
            }
            ExprKind::Prefix { op, operand } => write!(f, "({op}{operand})"),
            ExprKind::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "if {condition} {{ {then_branch} }}")?;
                if let Some(alt) = else_branch {
                    write!(f, " else {{ {alt} }}")?;
                }
                Ok(())
            }
            ExprKind::Function(lit) => write!(f, "{lit}"),
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_joined(f, args, ", ")?;
                f.write_str(")")
            }
            ExprKind::Index { base, index } => write!(f, "({base}[{index}])"),
        }
    }
}
