//! Interactive read-eval-print loop.
//!
//! One environment lives for the whole session, so bindings carry over
//! between inputs. A line ending in `\` continues on the next line; `quit`
//! leaves.

use std::process::ExitCode;

use monkey_eval::{Environment, Interpreter};
use monkey_ir::Stmt;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::{format_parse_errors, CliError, MONKEY_FACE};

pub const PROMPT: &str = ">> ";
pub const CONTINUATION_PROMPT: &str = "    ";

/// Evaluation state of one REPL session.
pub struct Session {
    interpreter: Interpreter,
    env: Environment,
}

impl Session {
    pub fn new(interpreter: Interpreter) -> Self {
        Session {
            interpreter,
            env: Environment::new(),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Evaluate one complete input and return what to print.
    ///
    /// Nothing is printed for blank input or when the input ends with a
    /// `let`. Scopes that became unreachable are reclaimed afterwards.
    pub fn eval_input(&mut self, input: &str) -> String {
        if input.trim().is_empty() {
            return String::new();
        }
        let program = match monkey_parse::parse(input) {
            Ok(program) => program,
            Err(errors) => return format_parse_errors(&errors),
        };
        let output = match self.interpreter.eval_program(&program, &self.env) {
            Ok(_) if program.statements.last().is_some_and(Stmt::is_let) => String::new(),
            Ok(value) => value.to_string(),
            Err(err) => format!("ERROR: {err}"),
        };
        self.env.collect_garbage(&[]);
        output
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.env.release();
    }
}

/// Joins `\`-continued lines into one input.
#[derive(Default)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn is_continuing(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn prompt(&self) -> &'static str {
        if self.is_continuing() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        }
    }

    /// Add a line; returns the full input once a line does not end in `\`.
    pub fn push(&mut self, line: &str) -> Option<String> {
        if let Some(continued) = line.strip_suffix('\\') {
            self.lines.push(continued.to_string());
            return None;
        }
        self.lines.push(line.to_string());
        let input = self.lines.join("\n");
        self.lines.clear();
        Some(input)
    }
}

pub fn run_repl() -> Result<ExitCode, CliError> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new(Interpreter::new());
    let mut buffer = LineBuffer::default();

    println!("{MONKEY_FACE}");
    println!("Welcome to the monkey programming language");

    loop {
        let line = match editor.readline(buffer.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => return Err(err.into()),
        };
        if !buffer.is_continuing() && line.trim() == "quit" {
            break;
        }
        let Some(input) = buffer.push(&line) else {
            continue;
        };
        if let Err(err) = editor.add_history_entry(input.as_str()) {
            debug!(%err, "history entry not recorded");
        }
        let output = session.eval_input(&input);
        if !output.is_empty() {
            println!("{output}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
