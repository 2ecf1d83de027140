//! Tree-walking interpreter.
//!
//! Evaluation is a recursive walk with the current `Environment` passed
//! explicitly. Internally every step yields `Result<Value, Interrupt>`: a
//! `return` travels up as `Interrupt::Return` through blocks until a function
//! call or the program boundary turns it back into a plain value, and errors
//! travel up as `Interrupt::Error` until they leave the interpreter.

mod builder;
mod function_call;

pub use builder::InterpreterBuilder;

use std::rc::Rc;

use monkey_ir::{Block, Expr, ExprKind, Program, Stmt, StmtKind};
use monkey_stack::ensure_sufficient_stack;

use crate::errors::{identifier_not_found, index_not_supported};
use crate::{
    evaluate_binary, evaluate_unary, Builtin, Environment, EvalError, EvalResult, FunctionValue,
    SharedPrintHandler, Value,
};

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Non-local exit from a statement sequence.
#[derive(Debug)]
pub(crate) enum Interrupt {
    Return(Value),
    Error(EvalError),
}

impl From<EvalError> for Interrupt {
    #[inline]
    fn from(err: EvalError) -> Self {
        Interrupt::Error(err)
    }
}

pub(crate) type Flow = Result<Value, Interrupt>;

/// Settle an interrupt at a boundary: a pending return becomes the value.
#[inline]
fn settle(flow: Flow) -> EvalResult {
    match flow {
        Ok(value) | Err(Interrupt::Return(value)) => Ok(value),
        Err(Interrupt::Error(err)) => Err(err),
    }
}

/// Evaluates Monkey syntax trees.
pub struct Interpreter {
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
    call_depth: usize,
}

impl Interpreter {
    /// An interpreter with default settings.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Run `program` in `env`. Its value is the value of the last statement
    /// executed, or of the first `return` reached.
    pub fn eval_program(&mut self, program: &Program, env: &Environment) -> EvalResult {
        settle(self.eval_statements(&program.statements, env))
    }

    fn eval_statements(&mut self, statements: &[Stmt], env: &Environment) -> Flow {
        let mut result = Value::Null;
        for stmt in statements {
            result = self.eval_stmt(stmt, env)?;
        }
        Ok(result)
    }

    fn eval_block(&mut self, block: &Block, env: &Environment) -> Flow {
        self.eval_statements(&block.statements, env)
    }

    fn eval_stmt(&mut self, stmt: &Stmt, env: &Environment) -> Flow {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(value, env)?;
                env.define(name.clone(), value);
                Ok(Value::Null)
            }
            StmtKind::Return(value) => {
                let value = self.eval_expr(value, env)?;
                Err(Interrupt::Return(value))
            }
            StmtKind::Expr(expr) => self.eval_expr(expr, env),
        }
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> Flow {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> Flow {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Integer(*n)),
            ExprKind::Bool(b) => Ok(Value::Boolean(*b)),
            ExprKind::Str(s) => Ok(Value::string(s)),
            ExprKind::Ident(name) => env
                .resolve(name)
                .or_else(|| Builtin::from_name(name).map(Value::Builtin))
                .ok_or_else(|| identifier_not_found(name).with_span(span).into()),
            ExprKind::Array(items) => {
                let values = self.eval_exprs(items, env)?;
                Ok(Value::array(values))
            }
            ExprKind::Prefix { op, operand } => {
                let operand = self.eval_expr(operand, env)?;
                Ok(evaluate_unary(*op, &operand).map_err(|e| e.with_span(span))?)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                Ok(evaluate_binary(&left, &right, *op).map_err(|e| e.with_span(span))?)
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.eval_block(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.eval_block(else_branch, env)
                } else {
                    Ok(Value::Null)
                }
            }
            ExprKind::Function(literal) => Ok(Value::Function(Rc::new(FunctionValue {
                literal: Rc::clone(literal),
                env: env.clone(),
            }))),
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee, env)?;
                let args = self.eval_exprs(args, env)?;
                Ok(self.apply(&callee, &args).map_err(|e| e.with_span(span))?)
            }
            ExprKind::Index { base, index } => {
                let base = self.eval_expr(base, env)?;
                let index = self.eval_expr(index, env)?;
                Ok(eval_index(&base, &index).map_err(|e| e.with_span(span))?)
            }
        }
    }

    /// Evaluate left to right, stopping at the first error.
    fn eval_exprs(&mut self, exprs: &[Expr], env: &Environment) -> Result<Vec<Value>, Interrupt> {
        exprs.iter().map(|expr| self.eval_expr(expr, env)).collect()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_index(base: &Value, index: &Value) -> EvalResult {
    match (base, index) {
        (Value::Array(items), Value::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Null)),
        _ => Err(index_not_supported(base.type_name())),
    }
}

/// A node that can be evaluated on its own.
///
/// A `return` reached while evaluating the node yields the returned value.
pub trait Evaluate {
    fn evaluate_with(&self, interpreter: &mut Interpreter, env: &Environment) -> EvalResult;
}

impl Evaluate for Program {
    fn evaluate_with(&self, interpreter: &mut Interpreter, env: &Environment) -> EvalResult {
        interpreter.eval_program(self, env)
    }
}

impl Evaluate for Stmt {
    fn evaluate_with(&self, interpreter: &mut Interpreter, env: &Environment) -> EvalResult {
        settle(interpreter.eval_stmt(self, env))
    }
}

impl Evaluate for Block {
    fn evaluate_with(&self, interpreter: &mut Interpreter, env: &Environment) -> EvalResult {
        settle(interpreter.eval_block(self, env))
    }
}

impl Evaluate for Expr {
    fn evaluate_with(&self, interpreter: &mut Interpreter, env: &Environment) -> EvalResult {
        settle(interpreter.eval_expr(self, env))
    }
}

/// Evaluate `node` in `env` with a default interpreter.
pub fn evaluate<N: Evaluate + ?Sized>(node: &N, env: &Environment) -> EvalResult {
    node.evaluate_with(&mut Interpreter::new(), env)
}
