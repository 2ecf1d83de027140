use super::*;
use monkey_eval::{buffer_handler, Value};
use pretty_assertions::assert_eq;

fn session() -> Session {
    Session::new(Interpreter::new())
}

#[test]
fn bindings_persist_between_inputs() {
    let mut session = session();
    assert_eq!(session.eval_input("let a = 5;"), "");
    assert_eq!(session.eval_input("let b = a * 2"), "");
    assert_eq!(session.eval_input("a + b"), "15");
    assert_eq!(session.env().resolve("b"), Some(Value::Integer(10)));
}

#[test]
fn values_print_in_inspect_form() {
    let mut session = session();
    assert_eq!(session.eval_input("\"monkey\""), "monkey");
    assert_eq!(session.eval_input("[1, true, \"x\"]"), "[1, true, x]");
    assert_eq!(session.eval_input("if (false) { 1 }"), "null");
    assert_eq!(session.eval_input("fn(x) { x * 2 }"), "fn(x) {\n(x * 2)\n}");
}

#[test]
fn blank_input_prints_nothing() {
    assert_eq!(session().eval_input("   "), "");
}

#[test]
fn runtime_errors_are_prefixed() {
    let mut session = session();
    assert_eq!(
        session.eval_input("5 + true"),
        "ERROR: type mismatch: INTEGER + BOOLEAN"
    );
    assert_eq!(session.eval_input("let x = 1; x"), "1");
}

#[test]
fn parse_errors_show_the_monkey() {
    let output = session().eval_input("let = 5; let x 5;");
    assert!(output.starts_with(MONKEY_FACE));
    assert!(output.ends_with(
        "Woops! We ran into some monkey business here!\n Parser errors:\n\
         \texpected next token to be IDENT, got = instead\n\
         \texpected next token to be =, got INT instead"
    ));
}

#[test]
fn puts_goes_to_the_print_handler() {
    let output = buffer_handler();
    let mut session = Session::new(Interpreter::builder().print_handler(output.clone()).build());
    assert_eq!(session.eval_input("puts(\"hi\")"), "null");
    assert_eq!(output.get_output(), "hi\n");
}

#[test]
fn discarded_closures_are_reclaimed_between_inputs() {
    let mut session = session();
    session.eval_input("let make = fn() { let self = fn() { self }; self };");
    session.eval_input("let kept = make();");
    let with_closure = session.env().live_scope_count();
    session.eval_input("let kept = 0;");
    assert!(session.env().live_scope_count() < with_closure);
    assert_eq!(session.env().live_scope_count(), 1);
}

#[test]
fn line_buffer_joins_continued_lines() {
    let mut buffer = LineBuffer::default();
    assert_eq!(buffer.prompt(), PROMPT);
    assert_eq!(buffer.push("let add = fn(a, b) {\\"), None);
    assert!(buffer.is_continuing());
    assert_eq!(buffer.prompt(), CONTINUATION_PROMPT);
    assert_eq!(buffer.push("  a + b\\"), None);
    assert_eq!(
        buffer.push("};"),
        Some("let add = fn(a, b) {\n  a + b\n};".to_string())
    );
    assert!(!buffer.is_continuing());
}

#[test]
fn continued_input_evaluates_as_one_program() {
    let mut buffer = LineBuffer::default();
    buffer.push("let add = fn(a, b) {\\");
    let input = buffer.push("a + b };").unwrap();
    let mut session = session();
    session.eval_input(&input);
    assert_eq!(session.eval_input("add(2, 3)"), "5");
}

#[test]
fn dropping_the_session_releases_its_globals() {
    let mut session = session();
    assert_eq!(session.eval_input("let f = fn() { f };"), "");
    let env = session.env().clone();
    drop(session);
    assert_eq!(env.resolve("f"), None);
}

#[test]
fn deeply_nested_input_evaluates() {
    let input = format!("{}true", "!".repeat(100_000));
    assert_eq!(session().eval_input(&input), "true");
}
