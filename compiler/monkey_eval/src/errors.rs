//! Runtime errors and their factory functions.
//!
//! Every error the evaluator raises is built through one of the `#[cold]`
//! factories below, so the message text lives in exactly one place: the
//! `#[error]` attribute of its `EvalErrorKind` variant.

use std::fmt;

use monkey_ir::Span;
use thiserror::Error;

use crate::Value;

/// Result of evaluating a node.
pub type EvalResult = Result<Value, EvalError>;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Operators
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        left: &'static str,
        op: &'static str,
        right: &'static str,
    },
    #[error("unknown operator: {op}{operand}")]
    UnknownPrefixOperator {
        op: &'static str,
        operand: &'static str,
    },
    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        op: &'static str,
        right: &'static str,
    },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    // Names and calls
    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: String },
    #[error("not a function: {type_name}")]
    NotAFunction { type_name: &'static str },
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },
    #[error("argument to {builtin} not supported, got {type_name}")]
    UnsupportedArgument {
        builtin: &'static str,
        type_name: &'static str,
    },
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    RecursionLimit { depth: usize },

    // Access
    #[error("index operator not supported: {type_name}")]
    IndexNotSupported { type_name: &'static str },
}

/// A runtime error, with the span of the node that raised it when known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    #[inline]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// The message shown to users.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Operator errors

#[cold]
pub fn type_mismatch(left: &'static str, op: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { left, op, right })
}

#[cold]
pub fn unknown_prefix_operator(op: &'static str, operand: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownPrefixOperator { op, operand })
}

#[cold]
pub fn unknown_infix_operator(
    left: &'static str,
    op: &'static str,
    right: &'static str,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownInfixOperator { left, op, right })
}

// Arithmetic errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Name and call errors

#[cold]
pub fn identifier_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IdentifierNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_a_function(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAFunction { type_name })
}

#[cold]
pub fn wrong_argument_count(got: usize, want: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgumentCount { got, want })
}

#[cold]
pub fn unsupported_argument(builtin: &'static str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedArgument { builtin, type_name })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Access errors

#[cold]
pub fn index_not_supported(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexNotSupported { type_name })
}
