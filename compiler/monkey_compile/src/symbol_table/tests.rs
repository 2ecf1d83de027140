use super::*;
use pretty_assertions::assert_eq;

fn sym(name: &str, scope: SymbolScope, index: usize) -> Symbol {
    Symbol::new(Name::from(name), scope, index)
}

/// Global `a`, `b`; first local `c`, `d`; second local `e`, `f`.
fn nested_tables() -> SymbolTable {
    let mut global = SymbolTable::new();
    global.define(Name::from("a"));
    global.define(Name::from("b"));
    let mut first = SymbolTable::enclosed(global);
    first.define(Name::from("c"));
    first.define(Name::from("d"));
    let mut second = SymbolTable::enclosed(first);
    second.define(Name::from("e"));
    second.define(Name::from("f"));
    second
}

#[test]
fn define_assigns_sequential_slots_per_table() {
    let mut global = SymbolTable::new();
    assert_eq!(global.define(Name::from("a")), sym("a", SymbolScope::Global, 0));
    assert_eq!(global.define(Name::from("b")), sym("b", SymbolScope::Global, 1));

    let mut first = SymbolTable::enclosed(global);
    assert_eq!(first.define(Name::from("c")), sym("c", SymbolScope::Local, 0));
    assert_eq!(first.define(Name::from("d")), sym("d", SymbolScope::Local, 1));

    let mut second = SymbolTable::enclosed(first);
    assert_eq!(second.define(Name::from("e")), sym("e", SymbolScope::Local, 0));
    assert_eq!(second.define(Name::from("f")), sym("f", SymbolScope::Local, 1));
    assert_eq!(second.num_definitions(), 2);
}

#[test]
fn resolve_global() {
    let mut global = SymbolTable::new();
    global.define(Name::from("a"));
    global.define(Name::from("b"));
    assert_eq!(global.resolve("a"), Some(sym("a", SymbolScope::Global, 0)));
    assert_eq!(global.resolve("b"), Some(sym("b", SymbolScope::Global, 1)));
    assert_eq!(global.resolve("c"), None);
}

#[test]
fn resolve_local_and_global() {
    let mut global = SymbolTable::new();
    global.define(Name::from("a"));
    global.define(Name::from("b"));
    let mut local = SymbolTable::enclosed(global);
    local.define(Name::from("c"));
    local.define(Name::from("d"));

    assert_eq!(local.resolve("a"), Some(sym("a", SymbolScope::Global, 0)));
    assert_eq!(local.resolve("b"), Some(sym("b", SymbolScope::Global, 1)));
    assert_eq!(local.resolve("c"), Some(sym("c", SymbolScope::Local, 0)));
    assert_eq!(local.resolve("d"), Some(sym("d", SymbolScope::Local, 1)));
    assert!(local.free_symbols().is_empty());
}

#[test]
fn resolve_free() {
    let mut second = nested_tables();
    let expected = [
        sym("a", SymbolScope::Global, 0),
        sym("b", SymbolScope::Global, 1),
        sym("c", SymbolScope::Free, 0),
        sym("d", SymbolScope::Free, 1),
        sym("e", SymbolScope::Local, 0),
        sym("f", SymbolScope::Local, 1),
    ];
    for symbol in &expected {
        assert_eq!(second.resolve(&symbol.name), Some(symbol.clone()));
    }
    assert_eq!(
        second.free_symbols(),
        &[sym("c", SymbolScope::Local, 0), sym("d", SymbolScope::Local, 1)]
    );

    let first = second.outer().unwrap();
    assert!(first.free_symbols().is_empty());
}

#[test]
fn resolving_twice_captures_once() {
    let mut second = nested_tables();
    assert_eq!(second.resolve("c"), Some(sym("c", SymbolScope::Free, 0)));
    assert_eq!(second.resolve("c"), Some(sym("c", SymbolScope::Free, 0)));
    assert_eq!(second.free_symbols().len(), 1);
}

#[test]
fn unresolvable_names_capture_nothing() {
    let mut global = SymbolTable::new();
    global.define(Name::from("a"));
    let mut first = SymbolTable::enclosed(global);
    first.define(Name::from("c"));
    let mut second = SymbolTable::enclosed(first);
    second.define(Name::from("e"));
    second.define(Name::from("f"));

    assert_eq!(second.resolve("a"), Some(sym("a", SymbolScope::Global, 0)));
    assert_eq!(second.resolve("c"), Some(sym("c", SymbolScope::Free, 0)));
    assert_eq!(second.resolve("b"), None);
    assert_eq!(second.resolve("d"), None);
    assert_eq!(second.free_symbols().len(), 1);
}

#[test]
fn free_of_free_chains_through_every_level() {
    let global = SymbolTable::new();
    let mut first = SymbolTable::enclosed(global);
    first.define(Name::from("a"));
    let second = SymbolTable::enclosed(first);
    let mut third = SymbolTable::enclosed(second);

    assert_eq!(third.resolve("a"), Some(sym("a", SymbolScope::Free, 0)));
    assert_eq!(third.free_symbols(), &[sym("a", SymbolScope::Free, 0)]);

    let second = third.into_outer().unwrap();
    assert_eq!(second.free_symbols(), &[sym("a", SymbolScope::Local, 0)]);
    assert_eq!(second.num_definitions(), 0);
}

#[test]
fn builtins_resolve_unchanged_at_any_depth() {
    let mut global = SymbolTable::new();
    let expected = [
        sym("a", SymbolScope::Builtin, 0),
        sym("c", SymbolScope::Builtin, 1),
        sym("e", SymbolScope::Builtin, 2),
        sym("f", SymbolScope::Builtin, 3),
    ];
    for symbol in &expected {
        global.define_builtin(symbol.index, symbol.name.clone());
    }
    assert_eq!(global.num_definitions(), 0);

    let first = SymbolTable::enclosed(global);
    let mut second = SymbolTable::enclosed(first);
    for symbol in &expected {
        assert_eq!(second.resolve(&symbol.name), Some(symbol.clone()));
    }
    assert!(second.free_symbols().is_empty());
}

#[test]
fn function_self_takes_no_slot() {
    let mut global = SymbolTable::new();
    assert_eq!(
        global.define_function_self(Name::from("a")),
        sym("a", SymbolScope::Function, 0)
    );
    assert_eq!(global.resolve("a"), Some(sym("a", SymbolScope::Function, 0)));
    assert_eq!(global.num_definitions(), 0);
}

#[test]
fn definition_shadows_function_self() {
    let mut global = SymbolTable::new();
    global.define_function_self(Name::from("a"));
    global.define(Name::from("a"));
    assert_eq!(global.resolve("a"), Some(sym("a", SymbolScope::Global, 0)));
}

#[test]
fn function_self_is_captured_by_inner_functions() {
    let global = SymbolTable::new();
    let mut outer_fn = SymbolTable::enclosed(global);
    outer_fn.define_function_self(Name::from("count"));
    outer_fn.define(Name::from("n"));
    let mut inner_fn = SymbolTable::enclosed(outer_fn);

    assert_eq!(inner_fn.resolve("count"), Some(sym("count", SymbolScope::Free, 0)));
    assert_eq!(inner_fn.resolve("n"), Some(sym("n", SymbolScope::Free, 1)));
    assert_eq!(
        inner_fn.free_symbols(),
        &[
            sym("count", SymbolScope::Function, 0),
            sym("n", SymbolScope::Local, 0)
        ]
    );
}

#[test]
fn redefinition_takes_a_new_slot() {
    let mut global = SymbolTable::new();
    global.define(Name::from("x"));
    assert_eq!(global.define(Name::from("x")), sym("x", SymbolScope::Global, 1));
    assert_eq!(global.resolve("x"), Some(sym("x", SymbolScope::Global, 1)));
}

#[test]
fn symbols_display_scope_and_index() {
    assert_eq!(sym("x", SymbolScope::Free, 2).to_string(), "x FREE[2]");
}
