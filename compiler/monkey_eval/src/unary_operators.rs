//! Unary operator implementations for the evaluator.

use monkey_ir::UnaryOp;

use crate::errors::{integer_overflow, unknown_prefix_operator};
use crate::{EvalResult, Value};

/// Evaluate `op operand`.
///
/// `!` works on every value through truthiness; `-` only on integers.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Boolean(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Integer(n) => n
                .checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| integer_overflow("negation")),
            other => Err(unknown_prefix_operator(op.as_symbol(), other.type_name())),
        },
    }
}
