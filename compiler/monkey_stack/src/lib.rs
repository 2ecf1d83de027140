//! Stack growth for recursive descent.
//!
//! Both the Pratt parser and the tree-walking evaluator recurse once per
//! nesting level of the source program. A program such as `((((...))))` or a
//! deeply recursive Monkey function would otherwise exhaust the native stack
//! long before the interpreter's own call-depth limit triggers.
//!
//! On native targets the `stacker` crate allocates a fresh stack segment
//! whenever less than [`RED_ZONE`] bytes remain. On `wasm32` the closure runs
//! directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
///
/// Wrap the body of every function that recurses on the shape of the input:
///
/// ```text
/// fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> Flow {
///     ensure_sufficient_stack(|| match &expr.kind { ... })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` has no `stacker` support; the runtime manages the stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
