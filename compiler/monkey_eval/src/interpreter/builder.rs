//! `InterpreterBuilder` for creating configured `Interpreter`s.

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::{stdout_handler, SharedPrintHandler};

/// Builder for `Interpreter`.
///
/// Defaults: output to stdout, call depth limited to
/// [`DEFAULT_MAX_CALL_DEPTH`].
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Where `puts` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Deepest chain of nested user function calls before evaluation fails.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_call_depth: self.max_call_depth,
            call_depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
