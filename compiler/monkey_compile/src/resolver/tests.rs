use super::*;
use crate::SymbolScope;
use pretty_assertions::assert_eq;

fn resolve(source: &str) -> Resolution {
    match monkey_parse::parse(source) {
        Ok(program) => resolve_program(&program),
        Err(errors) => panic!("parsing {source:?} failed: {errors:?}"),
    }
}

/// `name SCOPE[index]` for every identifier use, in source order.
fn uses(resolution: &Resolution) -> Vec<String> {
    resolution
        .names
        .iter()
        .map(|resolved| resolved.symbol.to_string())
        .collect()
}

fn sym(name: &str, scope: SymbolScope, index: usize) -> Symbol {
    Symbol::new(Name::from(name), scope, index)
}

#[test]
fn globals_and_locals() {
    let resolution = resolve("let a = 1; let f = fn(x) { let y = a + x; y }; f(2)");
    assert_eq!(
        uses(&resolution),
        vec!["a GLOBAL[0]", "x LOCAL[0]", "y LOCAL[1]", "f GLOBAL[1]"]
    );
    assert_eq!(resolution.num_globals, 2);
    assert_eq!(
        resolution.functions,
        vec![FunctionScope {
            name: Some(Name::from("f")),
            span: Span::new(19, 45),
            num_locals: 2,
            free_symbols: vec![],
        }]
    );
    assert!(!resolution.has_errors());
}

#[test]
fn closures_capture_enclosing_locals() {
    let resolution = resolve("let adder = fn(x) { fn(y) { x + y } };");
    assert_eq!(uses(&resolution), vec!["x FREE[0]", "y LOCAL[0]"]);

    let inner = &resolution.functions[0];
    assert_eq!(inner.name, None);
    assert_eq!(inner.num_locals, 1);
    assert_eq!(inner.free_symbols, vec![sym("x", SymbolScope::Local, 0)]);

    let outer = &resolution.functions[1];
    assert_eq!(outer.name, Some(Name::from("adder")));
    assert!(outer.free_symbols.is_empty());
}

#[test]
fn nested_captures_chain_outward() {
    let resolution = resolve("fn(a) { fn(b) { fn(c) { a + b + c } } }");
    assert_eq!(
        uses(&resolution),
        vec!["a FREE[0]", "b FREE[1]", "c LOCAL[0]"]
    );
    let free: Vec<Vec<Symbol>> = resolution
        .functions
        .iter()
        .map(|f| f.free_symbols.clone())
        .collect();
    assert_eq!(
        free,
        vec![
            vec![sym("a", SymbolScope::Free, 0), sym("b", SymbolScope::Local, 0)],
            vec![sym("a", SymbolScope::Local, 0)],
            vec![],
        ]
    );
}

#[test]
fn recursive_function_refers_to_itself() {
    let resolution =
        resolve("let count = fn(n) { if (n == 0) { 0 } else { count(n - 1) } }; count(3)");
    assert_eq!(
        uses(&resolution),
        vec!["n LOCAL[0]", "count FUNCTION[0]", "n LOCAL[0]", "count GLOBAL[0]"]
    );
}

#[test]
fn inner_function_captures_outer_self() {
    let resolution = resolve("let outer = fn() { fn() { outer } };");
    assert_eq!(uses(&resolution), vec!["outer FREE[0]"]);
    assert_eq!(
        resolution.functions[0].free_symbols,
        vec![sym("outer", SymbolScope::Function, 0)]
    );
}

#[test]
fn builtins_resolve_everywhere() {
    let resolution = resolve("len([1]); fn(a) { push(a, first(a)) }");
    assert_eq!(
        uses(&resolution),
        vec!["len BUILTIN[0]", "push BUILTIN[5]", "a LOCAL[0]", "first BUILTIN[2]", "a LOCAL[0]"]
    );
    assert!(resolution.functions[0].free_symbols.is_empty());
}

#[test]
fn let_binding_is_visible_in_its_own_value() {
    let resolution = resolve("let x = x;");
    assert_eq!(uses(&resolution), vec!["x GLOBAL[0]"]);
}

#[test]
fn undefined_names_are_reported_and_skipped() {
    let source = "let f = fn() { y }; z; f";
    let resolution = resolve(source);
    let messages: Vec<String> = resolution.errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["undefined variable y", "undefined variable z"]);
    let spans: Vec<&str> = resolution
        .errors
        .iter()
        .map(|err| &source[err.span().to_range()])
        .collect();
    assert_eq!(spans, vec!["y", "z"]);
    assert_eq!(uses(&resolution), vec!["f GLOBAL[0]"]);
}

#[test]
fn names_record_their_spans() {
    let source = "let abc = 1; abc";
    let resolution = resolve(source);
    assert_eq!(resolution.names[0].span, Span::new(13, 16));
}

#[test]
fn deeply_nested_expression_resolves() {
    let source = format!("let a = 1; {}a", "-".repeat(100_000));
    let resolution = resolve(&source);
    assert!(!resolution.has_errors());
    assert_eq!(uses(&resolution), vec!["a GLOBAL[0]"]);
}

#[test]
fn deeply_nested_functions_capture_through_every_level() {
    const DEPTH: usize = 5_000;
    let source = format!("fn(x) {{ {}x{} }}", "fn() { ".repeat(DEPTH), " }".repeat(DEPTH));
    let resolution = resolve(&source);
    assert!(!resolution.has_errors());
    assert_eq!(uses(&resolution), vec!["x FREE[0]"]);
    assert_eq!(resolution.functions.len(), DEPTH + 1);
    let outermost = resolution.functions.last().unwrap();
    assert_eq!(outermost.num_locals, 1);
    assert!(outermost.free_symbols.is_empty());
    assert_eq!(
        resolution.functions[DEPTH - 1].free_symbols,
        vec![sym("x", SymbolScope::Local, 0)]
    );
}
