//! Runtime values.

use std::fmt;
use std::mem;
use std::rc::Rc;

use monkey_ir::FunctionLit;
use monkey_stack::ensure_sufficient_stack;

use crate::{Builtin, Environment};

/// A Monkey value.
///
/// Aggregates are reference counted and immutable once built, so cloning a
/// `Value` never copies a string or an array.
///
/// Arrays can nest arbitrarily deep (each call chain may wrap the previous
/// result), so printing and dropping them grow the stack as needed.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    Str(Rc<str>),
    Array(Rc<Vec<Value>>),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
}

/// A closure: the literal it was created from plus the environment that was
/// active at that point.
pub struct FunctionValue {
    pub literal: Rc<FunctionLit>,
    pub env: Environment,
}

impl Value {
    #[inline]
    pub fn string(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }

    /// Upper-case type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::Str(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    /// Only `false` and `null` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        if let Value::Array(items) = self {
            if let Some(items) = Rc::get_mut(items) {
                let items = mem::take(items);
                ensure_sufficient_stack(move || drop(items));
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => ensure_sufficient_stack(|| {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }),
            Value::Function(func) => write!(f, "{func}"),
            Value::Builtin(_) => f.write_str("builtin function"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Null => f.write_str("Null"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Array(items) => f.debug_tuple("Array").field(&**items).finish(),
            Value::Function(func) => write!(f, "Function({func})"),
            Value::Builtin(b) => write!(f, "Builtin({})", b.name()),
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, param) in self.literal.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param)?;
        }
        write!(f, ") {{\n{}\n}}", self.literal.body)
    }
}
