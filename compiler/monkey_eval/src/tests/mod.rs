//! Evaluator behaviour tests, driven from source text.

mod property_tests;

use crate::{Environment, EvalError, EvalResult, Interpreter, Value};

fn try_eval_with(interpreter: &mut Interpreter, source: &str) -> EvalResult {
    let program = match monkey_parse::parse(source) {
        Ok(program) => program,
        Err(errors) => panic!("parsing {source:?} failed: {errors:?}"),
    };
    interpreter.eval_program(&program, &Environment::new())
}

fn try_eval(source: &str) -> EvalResult {
    try_eval_with(&mut Interpreter::new(), source)
}

fn eval(source: &str) -> Value {
    match try_eval(source) {
        Ok(value) => value,
        Err(err) => panic!("evaluating {source:?} failed: {err}"),
    }
}

fn eval_err(source: &str) -> EvalError {
    match try_eval(source) {
        Ok(value) => panic!("expected {source:?} to fail, got {value}"),
        Err(err) => err,
    }
}

fn assert_evals_to(cases: &[(&str, Value)]) {
    for (source, expected) in cases {
        pretty_assertions::assert_eq!(&eval(source), expected, "in {source:?}");
    }
}

fn int(n: i64) -> Value {
    Value::Integer(n)
}

fn boolean(b: bool) -> Value {
    Value::Boolean(b)
}
