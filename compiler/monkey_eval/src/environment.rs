//! Environments: chained name bindings shared between closures.
//!
//! An `Environment` is a handle to a scope. Closures keep the handle that
//! was active when they were created, and every call gets a fresh child
//! scope whose parent is the closure's. Scopes are reference counted, so a
//! scope lives exactly as long as something still refers to it.
//!
//! A closure stored in the scope it captured forms a cycle that reference
//! counting cannot free. Every scope created from a root is therefore
//! tracked weakly in a registry shared by the whole tree, and
//! [`Environment::collect_garbage`] breaks the cycles that are no longer
//! reachable.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use monkey_ir::Name;

use crate::Value;

/// Registry size below which pruning dead entries is not worth a pass.
const MIN_PRUNE_THRESHOLD: usize = 64;

/// Single-threaded shared scope: `Rc<RefCell<T>>` behind one constructor.
#[repr(transparent)]
struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    fn downgrade(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.0)
    }

    /// Identity of the scope, for the collector's mark set.
    #[inline]
    fn id(&self) -> *const RefCell<T> {
        Rc::as_ptr(&self.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

/// One level of bindings.
#[derive(Default)]
struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        // Walk the chain iteratively; deep call chains make deep scope chains.
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let scope = scope.borrow();
            if let Some(value) = scope.bindings.get(name) {
                return Some(value.clone());
            }
            next = scope.parent.clone();
        }
        None
    }
}

/// Weak references to every scope of one environment tree.
struct Registry {
    scopes: Vec<Weak<RefCell<Scope>>>,
    prune_at: usize,
}

impl Registry {
    fn new() -> Self {
        Registry {
            scopes: Vec::new(),
            prune_at: MIN_PRUNE_THRESHOLD,
        }
    }

    fn track(&mut self, scope: &LocalScope<Scope>) {
        if self.scopes.len() >= self.prune_at {
            self.scopes.retain(|weak| weak.strong_count() > 0);
            self.prune_at = (self.scopes.len() * 2).max(MIN_PRUNE_THRESHOLD);
        }
        self.scopes.push(scope.downgrade());
    }

    /// Drop dead entries and return strong handles to the live scopes.
    fn live_scopes(&mut self) -> Vec<LocalScope<Scope>> {
        self.scopes.retain(|weak| weak.strong_count() > 0);
        self.prune_at = (self.scopes.len() * 2).max(MIN_PRUNE_THRESHOLD);
        self.scopes
            .iter()
            .filter_map(Weak::upgrade)
            .map(LocalScope)
            .collect()
    }
}

/// Handle to a scope and, through its parents, to every enclosing scope.
///
/// Cloning the handle shares the scope.
#[derive(Clone)]
pub struct Environment {
    scope: LocalScope<Scope>,
    registry: Rc<RefCell<Registry>>,
}

impl Environment {
    /// A new root environment with its own registry.
    pub fn new() -> Self {
        let scope = LocalScope::new(Scope::default());
        let mut registry = Registry::new();
        registry.track(&scope);
        Environment {
            scope,
            registry: Rc::new(RefCell::new(registry)),
        }
    }

    /// A child scope whose lookups fall back to `self`.
    pub fn enclosed(&self) -> Self {
        let scope = LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.scope.clone()),
        });
        self.registry.borrow_mut().track(&scope);
        Environment {
            scope,
            registry: Rc::clone(&self.registry),
        }
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    #[inline]
    pub fn define(&self, name: Name, value: Value) {
        self.scope.borrow_mut().bindings.insert(name, value);
    }

    /// Look `name` up in this scope, then in each enclosing scope.
    #[inline]
    pub fn resolve(&self, name: &str) -> Option<Value> {
        self.scope.borrow().lookup(name)
    }

    /// Whether both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.scope.id() == other.scope.id()
    }

    /// Number of scopes of this tree that are still allocated.
    pub fn live_scope_count(&self) -> usize {
        self.registry
            .borrow()
            .scopes
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Break the reference cycles of every scope in this tree that can no
    /// longer be reached from `self` or from `extra_roots`.
    ///
    /// Unreachable scopes lose their bindings and parent link, which lets
    /// reference counting free them. Returns how many scopes were cleared.
    ///
    /// Only call this between evaluations: a scope that is reachable only
    /// from the Rust stack of a running evaluation would be cleared.
    ///
    /// `self` is always reachable, so a closure bound in `self` and `self`
    /// keep each other alive. Call [`release`](Self::release) when the tree
    /// is done with.
    pub fn collect_garbage(&self, extra_roots: &[Value]) -> usize {
        let marked = self.mark(extra_roots);
        let live = self.registry.borrow_mut().live_scopes();
        let total = live.len();

        let mut reclaimed = 0;
        for scope in live {
            if marked.contains(&scope.id()) {
                continue;
            }
            clear_scope(&scope);
            reclaimed += 1;
        }

        debug!(total, reclaimed, "environment collection");
        reclaimed
    }

    /// Drop every binding of this scope and its parent link.
    ///
    /// Ends a session or program run: closures stored here stop holding the
    /// scope they captured, so the next collection (or plain reference
    /// counting) frees them.
    pub fn release(&self) {
        clear_scope(&self.scope);
    }

    fn mark(&self, extra_roots: &[Value]) -> FxHashSet<*const RefCell<Scope>> {
        let mut marked = FxHashSet::default();
        let mut scopes = vec![self.scope.clone()];
        let mut values: Vec<Value> = extra_roots.to_vec();

        loop {
            while let Some(value) = values.pop() {
                match &value {
                    Value::Array(items) => values.extend(items.iter().cloned()),
                    Value::Function(func) => scopes.push(func.env.scope.clone()),
                    Value::Integer(_)
                    | Value::Boolean(_)
                    | Value::Null
                    | Value::Str(_)
                    | Value::Builtin(_) => {}
                }
            }
            let Some(scope) = scopes.pop() else {
                break;
            };
            if !marked.insert(scope.id()) {
                continue;
            }
            let inner = scope.borrow();
            values.extend(inner.bindings.values().cloned());
            if let Some(parent) = &inner.parent {
                scopes.push(parent.clone());
            }
        }
        marked
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.scope.borrow();
        let mut names: Vec<&str> = scope.bindings.keys().map(Name::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}

fn clear_scope(scope: &LocalScope<Scope>) {
    let (bindings, parent) = {
        let mut inner = scope.borrow_mut();
        (mem::take(&mut inner.bindings), inner.parent.take())
    };
    // Dropped outside the borrow: freeing them may release other scopes.
    drop(bindings);
    drop(parent);
}
