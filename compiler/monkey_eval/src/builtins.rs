//! Built-in functions.
//!
//! The registry is fixed and ordered; a builtin's position is its index,
//! which the symbol table uses for `Builtin`-scoped symbols.

use std::rc::Rc;

use crate::errors::{integer_overflow, unsupported_argument, wrong_argument_count};
use crate::{EvalError, EvalResult, PrintHandler, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Len,
    Puts,
    First,
    Last,
    Rest,
    Push,
}

impl Builtin {
    /// Every builtin, in index order.
    pub const ALL: [Builtin; 6] = [
        Builtin::Len,
        Builtin::Puts,
        Builtin::First,
        Builtin::Last,
        Builtin::Rest,
        Builtin::Push,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Len => "len",
            Builtin::Puts => "puts",
            Builtin::First => "first",
            Builtin::Last => "last",
            Builtin::Rest => "rest",
            Builtin::Push => "push",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Run the builtin on already-evaluated arguments.
    pub fn call(self, args: &[Value], out: &PrintHandler) -> EvalResult {
        match self {
            Builtin::Len => {
                let [arg] = expect_args::<1>(args)?;
                let len = match arg {
                    Value::Str(s) => s.len(),
                    Value::Array(items) => items.len(),
                    other => return Err(unsupported_argument(self.name(), other.type_name())),
                };
                i64::try_from(len)
                    .map(Value::Integer)
                    .map_err(|_| integer_overflow("len"))
            }
            Builtin::Puts => {
                for arg in args {
                    out.println(&arg.to_string());
                }
                Ok(Value::Null)
            }
            Builtin::First => {
                let [arg] = expect_args::<1>(args)?;
                let items = self.array_arg(arg)?;
                Ok(items.first().cloned().unwrap_or(Value::Null))
            }
            Builtin::Last => {
                let [arg] = expect_args::<1>(args)?;
                let items = self.array_arg(arg)?;
                Ok(items.last().cloned().unwrap_or(Value::Null))
            }
            Builtin::Rest => {
                let [arg] = expect_args::<1>(args)?;
                let items = self.array_arg(arg)?;
                Ok(match items.split_first() {
                    Some((_, rest)) => Value::array(rest.to_vec()),
                    None => Value::Null,
                })
            }
            Builtin::Push => {
                let [array, value] = expect_args::<2>(args)?;
                let items = self.array_arg(array)?;
                let mut pushed = Vec::with_capacity(items.len() + 1);
                pushed.extend(items.iter().cloned());
                pushed.push(value.clone());
                Ok(Value::array(pushed))
            }
        }
    }

    fn array_arg(self, arg: &Value) -> Result<&Rc<Vec<Value>>, EvalError> {
        match arg {
            Value::Array(items) => Ok(items),
            other => Err(unsupported_argument(self.name(), other.type_name())),
        }
    }
}

/// Destructure `args` into exactly `N` arguments.
fn expect_args<const N: usize>(args: &[Value]) -> Result<&[Value; N], EvalError> {
    args.try_into()
        .map_err(|_| wrong_argument_count(args.len(), N))
}
