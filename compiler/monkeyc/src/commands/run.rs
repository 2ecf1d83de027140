//! `monkey <file>` / `monkey run <file>`.

use std::process::ExitCode;
use std::slice;

use monkey_eval::{Environment, EvalError, Interpreter, Value};
use tracing::debug;

use super::read_file;
use crate::{format_parse_errors, CliError};

/// How a whole-program run ended.
#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    Finished(Value),
    /// Parse errors, already rendered for display.
    ParseFailed(String),
    Failed(EvalError),
}

/// Evaluate `source` as one program in a fresh environment.
pub fn execute(source: &str, interpreter: &mut Interpreter) -> RunOutcome {
    let program = match monkey_parse::parse(source) {
        Ok(program) => program,
        Err(errors) => return RunOutcome::ParseFailed(format_parse_errors(&errors)),
    };
    let env = Environment::new();
    let outcome = match interpreter.eval_program(&program, &env) {
        Ok(value) => RunOutcome::Finished(value),
        Err(err) => RunOutcome::Failed(err),
    };
    // The program is over: unbind its globals so closures bound there are
    // freed, keeping only what the result still refers to.
    env.release();
    let roots: &[Value] = match &outcome {
        RunOutcome::Finished(value) => slice::from_ref(value),
        RunOutcome::ParseFailed(_) | RunOutcome::Failed(_) => &[],
    };
    let reclaimed = env.collect_garbage(roots);
    debug!(reclaimed, "program finished");
    outcome
}

/// Run a file, printing its value unless it is null.
pub fn run_file(path: &str) -> Result<ExitCode, CliError> {
    let source = read_file(path)?;
    match execute(&source, &mut Interpreter::new()) {
        RunOutcome::Finished(value) => {
            if !value.is_null() {
                println!("{value}");
            }
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::ParseFailed(report) => {
            println!("{report}");
            Ok(ExitCode::FAILURE)
        }
        RunOutcome::Failed(err) => {
            match err.span {
                Some(span) => {
                    let (line, col) = span.line_col(&source);
                    eprintln!("{path}:{line}:{col}: {err}");
                }
                None => eprintln!("{err}"),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
