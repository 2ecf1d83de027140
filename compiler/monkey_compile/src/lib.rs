//! Monkey Compile - compile-time name resolution.
//!
//! [`SymbolTable`] assigns every binding a scope and a slot index the way a
//! bytecode compiler needs them: globals and locals get sequential slots,
//! builtins keep their registry index, and names a function uses from an
//! enclosing function become numbered free variables.
//!
//! [`resolve_program`] walks a parsed program with a symbol table and
//! reports what every identifier resolves to.

mod resolver;
mod symbol_table;

pub use resolver::{resolve_program, FunctionScope, Resolution, ResolveError, ResolvedName};
pub use symbol_table::{Symbol, SymbolScope, SymbolTable};
