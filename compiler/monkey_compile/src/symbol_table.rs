//! Nested symbol tables.

use std::fmt;

use rustc_hash::FxHashMap;

use monkey_ir::Name;
use monkey_stack::ensure_sufficient_stack;

/// Where a symbol's value lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolScope {
    /// Top-level binding.
    Global,
    /// Binding inside a function body (parameters included).
    Local,
    /// Binding of an enclosing function, captured by this one.
    Free,
    /// Native function; the index is its registry position.
    Builtin,
    /// The function currently being defined, referring to itself.
    Function,
}

impl SymbolScope {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolScope::Global => "GLOBAL",
            SymbolScope::Local => "LOCAL",
            SymbolScope::Free => "FREE",
            SymbolScope::Builtin => "BUILTIN",
            SymbolScope::Function => "FUNCTION",
        }
    }
}

impl fmt::Display for SymbolScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: Name,
    pub scope: SymbolScope,
    pub index: usize,
}

impl Symbol {
    pub fn new(name: Name, scope: SymbolScope, index: usize) -> Self {
        Symbol { name, scope, index }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}[{}]", self.name, self.scope, self.index)
    }
}

/// Bindings of one function body (or of the program), chained to the
/// enclosing body's table.
///
/// Tables only grow: there is no way to remove a symbol.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    store: FxHashMap<Name, Symbol>,
    /// Slots handed out by `define`; builtins and the function's own name
    /// take no slot.
    num_definitions: usize,
    outer: Option<Box<SymbolTable>>,
    /// Symbols of enclosing tables this table captured, in capture order.
    /// A `Free` symbol's index is its position here.
    free_symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// The outermost table.
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// A table for a function body nested in `outer`.
    pub fn enclosed(outer: SymbolTable) -> Self {
        SymbolTable {
            outer: Some(Box::new(outer)),
            ..SymbolTable::default()
        }
    }

    /// Leave this table, returning the enclosing one.
    pub fn into_outer(self) -> Option<SymbolTable> {
        self.outer.map(|outer| *outer)
    }

    pub fn outer(&self) -> Option<&SymbolTable> {
        self.outer.as_deref()
    }

    pub fn num_definitions(&self) -> usize {
        self.num_definitions
    }

    pub fn free_symbols(&self) -> &[Symbol] {
        &self.free_symbols
    }

    /// Bind `name` to the next slot: `Global` in the outermost table,
    /// `Local` otherwise. Redefining a name replaces the old symbol and
    /// still takes a new slot.
    pub fn define(&mut self, name: Name) -> Symbol {
        let scope = if self.outer.is_none() {
            SymbolScope::Global
        } else {
            SymbolScope::Local
        };
        let symbol = Symbol::new(name.clone(), scope, self.num_definitions);
        self.num_definitions += 1;
        self.store.insert(name, symbol.clone());
        symbol
    }

    /// Bind the name of the function this table belongs to.
    pub fn define_function_self(&mut self, name: Name) -> Symbol {
        let symbol = Symbol::new(name.clone(), SymbolScope::Function, 0);
        self.store.insert(name, symbol.clone());
        symbol
    }

    pub fn define_builtin(&mut self, index: usize, name: Name) -> Symbol {
        let symbol = Symbol::new(name.clone(), SymbolScope::Builtin, index);
        self.store.insert(name, symbol.clone());
        symbol
    }

    fn define_free(&mut self, original: Symbol) -> Symbol {
        let name = original.name.clone();
        self.free_symbols.push(original);
        let symbol = Symbol::new(name.clone(), SymbolScope::Free, self.free_symbols.len() - 1);
        self.store.insert(name, symbol.clone());
        symbol
    }

    /// Find what `name` refers to from this table.
    ///
    /// Misses fall through to the enclosing tables. A `Local`, `Free` or
    /// `Function` symbol found there is captured: it is appended to this
    /// table's free symbols and a `Free` symbol for it is bound here, so
    /// a second lookup hits locally. `Global` and `Builtin` symbols are
    /// returned unchanged.
    pub fn resolve(&mut self, name: &str) -> Option<Symbol> {
        if let Some(symbol) = self.store.get(name) {
            return Some(symbol.clone());
        }
        let outer = self.outer.as_mut()?;
        let found = ensure_sufficient_stack(|| outer.resolve(name))?;
        match found.scope {
            SymbolScope::Global | SymbolScope::Builtin => Some(found),
            SymbolScope::Local | SymbolScope::Free | SymbolScope::Function => {
                Some(self.define_free(found))
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
