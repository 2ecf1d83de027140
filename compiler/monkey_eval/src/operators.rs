//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch: the set of value types is closed, so a
//! `match` on the operand pair covers every case.

use std::rc::Rc;

use monkey_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, modulo_by_zero, type_mismatch, unknown_infix_operator,
};
use crate::{EvalResult, Value};

/// Checked arithmetic where the only failure is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Integer).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `left op right`.
///
/// Operands of different types are a type mismatch, even for `==`.
/// Same-typed operands without a rule for `op` are an unknown operator.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_int_binary(*a, *b, op),
        (Value::Boolean(a), Value::Boolean(b)) => eval_bool_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        _ if left.type_name() == right.type_name() => Err(unknown_infix_operator(
            left.type_name(),
            op.as_symbol(),
            right.type_name(),
        )),
        _ => Err(type_mismatch(
            left.type_name(),
            op.as_symbol(),
            right.type_name(),
        )),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), "remainder")
            }
        }
        BinaryOp::Lt => Ok(Value::Boolean(a < b)),
        BinaryOp::Gt => Ok(Value::Boolean(a > b)),
        BinaryOp::Eq => Ok(Value::Boolean(a == b)),
        BinaryOp::NotEq => Ok(Value::Boolean(a != b)),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Boolean(a == b)),
        BinaryOp::NotEq => Ok(Value::Boolean(a != b)),
        _ => Err(unknown_infix_operator("BOOLEAN", op.as_symbol(), "BOOLEAN")),
    }
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(Rc::from(joined)))
        }
        _ => Err(unknown_infix_operator("STRING", op.as_symbol(), "STRING")),
    }
}
