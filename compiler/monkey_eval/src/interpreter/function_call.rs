//! Applying functions to arguments.

use super::{settle, Interpreter};
use crate::errors::{not_a_function, recursion_limit_exceeded, wrong_argument_count};
use crate::{EvalResult, FunctionValue, Value};

impl Interpreter {
    /// Call `callee` with evaluated `args`.
    pub fn apply(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args),
            Value::Builtin(builtin) => builtin.call(args, &self.print_handler),
            other => Err(not_a_function(other.type_name())),
        }
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(name = func.literal.name.as_deref().unwrap_or("<anonymous>"), depth = self.call_depth)
    )]
    fn call_function(&mut self, func: &FunctionValue, args: &[Value]) -> EvalResult {
        let params = &func.literal.params;
        if params.len() != args.len() {
            return Err(wrong_argument_count(args.len(), params.len()));
        }
        if self.call_depth >= self.max_call_depth {
            return Err(recursion_limit_exceeded(self.max_call_depth));
        }

        let env = func.env.enclosed();
        for (param, arg) in params.iter().zip(args) {
            env.define(param.clone(), arg.clone());
        }

        self.call_depth += 1;
        let result = self.eval_block(&func.literal.body, &env);
        self.call_depth -= 1;
        settle(result)
    }
}
