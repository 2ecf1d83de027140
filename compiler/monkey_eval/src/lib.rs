//! Monkey Eval - tree-walking evaluator for Monkey programs.
//!
//! # Architecture
//!
//! - `Value`: runtime values; errors are never values
//! - `Environment`: shared, chained name bindings with a cycle collector
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `Builtin`: the fixed registry of native functions
//! - `Interpreter`: recursive evaluation over the AST, configured through
//!   `InterpreterBuilder`
//!
//! Evaluation returns `Result<Value, EvalError>`. A `return` statement is an
//! internal short-circuit that never escapes a function call or a program.

mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use builtins::Builtin;
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{evaluate, Evaluate, Interpreter, InterpreterBuilder};
pub use operators::evaluate_binary;
pub use print_handler::{buffer_handler, stdout_handler, PrintHandler, SharedPrintHandler};
pub use unary_operators::evaluate_unary;
pub use value::{FunctionValue, Value};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
